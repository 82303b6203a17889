use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the Operations Load Diagnostic.
///
/// The taxonomy is deliberately small: every error is terminal for the
/// current run and no partial report is ever exposed. Timestamp parse
/// failures and content-less records are not errors; they degrade to
/// "no timestamp" and a silent skip during normalization.
#[derive(Error, Debug)]
pub enum DiagnosticError {
    /// Normalization produced zero usable records from the supplied text.
    #[error("No valid inbound records found in the supplied input")]
    EmptyInput,

    /// An input file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON document could not be serialized or parsed.
    #[error("Failed to process JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the diagnostic crates.
pub type Result<T> = std::result::Result<T, DiagnosticError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_empty_input() {
        let msg = DiagnosticError::EmptyInput.to_string();
        assert_eq!(msg, "No valid inbound records found in the supplied input");
    }

    #[test]
    fn test_error_display_file_read() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = DiagnosticError::FileRead {
            path: PathBuf::from("/some/inbound.csv"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read file"));
        assert!(msg.contains("/some/inbound.csv"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_error_display_config() {
        let err = DiagnosticError::Config("missing input path".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing input path");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: DiagnosticError = io_err.into();
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{invalid}").unwrap_err();
        let err: DiagnosticError = json_err.into();
        assert!(err.to_string().contains("Failed to process JSON"));
    }
}
