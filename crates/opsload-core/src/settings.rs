use clap::{CommandFactory, Parser};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// One-time operations load diagnostic over an inbound message batch
#[derive(Parser, Debug, Clone)]
#[command(
    name = "opsload",
    about = "Run a one-time operations load diagnostic and generate a static report",
    version
)]
pub struct Settings {
    /// Input dialect
    #[arg(long, value_parser = ["csv", "text"])]
    pub mode: String,

    /// Path to the input file
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Lookback window in days (minimum 1)
    #[arg(long, default_value = "14", value_parser = clap::value_parser!(u32).range(1..))]
    pub lookback_days: u32,

    /// Maximum number of records analyzed (minimum 10)
    #[arg(long, default_value = "200", value_parser = clap::value_parser!(u32).range(10..))]
    pub max_items: u32,

    /// Directory where reports are written
    #[arg(long, default_value = "output")]
    pub output_dir: PathBuf,

    /// Base name for generated report files
    #[arg(long, default_value = "operations_load_diagnostic")]
    pub report_name: String,

    /// Report output format
    #[arg(long, default_value = "both", value_parser = ["markdown", "html", "both"])]
    pub format: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Clear saved configuration
    #[arg(long)]
    pub clear: bool,
}

// ── LastUsedParams ─────────────────────────────────────────────────────────────

/// Persisted last-used parameters saved to `~/.opsload/last_used.json`.
///
/// Only tunables are remembered; the input mode and path always come from
/// the command line.
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct LastUsedParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lookback_days: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl LastUsedParams {
    /// Return the default path to the persisted config file.
    /// Uses `~/.opsload/last_used.json`.
    pub fn config_path() -> PathBuf {
        Self::config_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Return the config path rooted at `base_dir` (used for testing).
    pub fn config_path_in(base_dir: &std::path::Path) -> PathBuf {
        base_dir.join(".opsload").join("last_used.json")
    }

    /// Load persisted params from an explicit path.
    /// Returns `Default` when the file is absent or cannot be parsed.
    pub fn load_from(path: &std::path::Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(&content).unwrap_or_default()
    }

    /// Atomically write params to an explicit path, creating parent
    /// directories if needed.
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;

        // Write to a temp file then rename for atomicity.
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, path)?;

        Ok(())
    }

    /// Delete the config file at an explicit path if it exists.
    pub fn clear_at(path: &std::path::Path) -> Result<(), std::io::Error> {
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse CLI arguments, merge with last-used params where no explicit CLI
    /// value was provided, and persist the result.
    pub fn load_with_last_used() -> Self {
        Self::load_with_last_used_impl(
            std::env::args_os().collect(),
            &LastUsedParams::config_path(),
        )
    }

    /// Full implementation – accepts args and an explicit config path so that
    /// tests can redirect to a temporary directory.
    pub fn load_with_last_used_impl(
        args: Vec<std::ffi::OsString>,
        config_path: &std::path::Path,
    ) -> Self {
        // Build raw ArgMatches so we can query ValueSource.
        let matches = Settings::command().get_matches_from(args.clone());

        // Parse into the typed struct using the same args.
        let mut settings = Settings::parse_from(args);

        if settings.clear {
            let _ = LastUsedParams::clear_at(config_path);
            return Self::apply_debug(settings);
        }

        let last = LastUsedParams::load_from(config_path);

        // Merge last-used values for fields that were NOT explicitly set on
        // the command line (CLI always wins).
        // NOTE: clap stores the arg id using the *field name* (underscores),
        // not the long-flag spelling (hyphens).
        if !is_arg_explicitly_set(&matches, "lookback_days") {
            if let Some(v) = last.lookback_days {
                settings.lookback_days = v.max(1);
            }
        }
        if !is_arg_explicitly_set(&matches, "max_items") {
            if let Some(v) = last.max_items {
                settings.max_items = v.max(10);
            }
        }
        if !is_arg_explicitly_set(&matches, "output_dir") {
            if let Some(v) = last.output_dir {
                settings.output_dir = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "format") {
            if let Some(v) = last.format {
                settings.format = v;
            }
        }

        settings = Self::apply_debug(settings);

        // Persist current settings for next run.
        let params = LastUsedParams::from(&settings);
        let _ = params.save_to(config_path);

        settings
    }

    /// `--debug` overrides the log level.
    fn apply_debug(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }
}

// ── Conversion ─────────────────────────────────────────────────────────────────

impl From<&Settings> for LastUsedParams {
    fn from(s: &Settings) -> Self {
        LastUsedParams {
            lookback_days: Some(s.lookback_days),
            max_items: Some(s.max_items),
            output_dir: Some(s.output_dir.clone()),
            format: Some(s.format.clone()),
        }
    }
}

// ── Helper: check if an arg was explicitly set on the command line ─────────────

/// Returns `true` when `name` was supplied explicitly on the command line
/// (not via default value or environment variable).
fn is_arg_explicitly_set(matches: &clap::ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(clap::parser::ValueSource::CommandLine)
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn tmp_config_path(tmp: &TempDir) -> PathBuf {
        LastUsedParams::config_path_in(tmp.path())
    }

    fn os_args(args: &[&str]) -> Vec<std::ffi::OsString> {
        args.iter().map(|a| a.into()).collect()
    }

    // ── LastUsedParams ────────────────────────────────────────────────────────

    #[test]
    fn test_last_used_params_save_load() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp_config_path(&tmp);
        let params = LastUsedParams {
            lookback_days: Some(7),
            max_items: Some(50),
            output_dir: Some(PathBuf::from("reports")),
            format: Some("markdown".to_string()),
        };

        params.save_to(&path).expect("save");
        let loaded = LastUsedParams::load_from(&path);

        assert_eq!(loaded.lookback_days, Some(7));
        assert_eq!(loaded.max_items, Some(50));
        assert_eq!(loaded.output_dir, Some(PathBuf::from("reports")));
        assert_eq!(loaded.format, Some("markdown".to_string()));
    }

    #[test]
    fn test_last_used_params_default_when_missing() {
        let tmp = TempDir::new().expect("tempdir");
        let loaded = LastUsedParams::load_from(&tmp_config_path(&tmp));
        assert!(loaded.lookback_days.is_none());
        assert!(loaded.max_items.is_none());
        assert!(loaded.output_dir.is_none());
        assert!(loaded.format.is_none());
    }

    #[test]
    fn test_last_used_params_clear() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp_config_path(&tmp);
        let params = LastUsedParams {
            format: Some("html".to_string()),
            ..Default::default()
        };
        params.save_to(&path).expect("save");
        assert!(path.exists());

        LastUsedParams::clear_at(&path).expect("clear");
        assert!(!path.exists());
    }

    // ── Settings defaults ─────────────────────────────────────────────────────

    #[test]
    fn test_settings_default_values() {
        let settings = Settings::parse_from(["opsload", "--mode", "csv"]);

        assert_eq!(settings.mode, "csv");
        assert_eq!(settings.lookback_days, 14);
        assert_eq!(settings.max_items, 200);
        assert_eq!(settings.output_dir, PathBuf::from("output"));
        assert_eq!(settings.report_name, "operations_load_diagnostic");
        assert_eq!(settings.format, "both");
        assert_eq!(settings.log_level, "INFO");
        assert!(!settings.debug);
        assert!(!settings.clear);
    }

    #[test]
    fn test_settings_rejects_lookback_below_minimum() {
        let result =
            Settings::try_parse_from(["opsload", "--mode", "csv", "--lookback-days", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_settings_rejects_max_items_below_minimum() {
        let result = Settings::try_parse_from(["opsload", "--mode", "csv", "--max-items", "5"]);
        assert!(result.is_err());
    }

    // ── Merge behaviour ───────────────────────────────────────────────────────

    #[test]
    fn test_merge_uses_last_used_when_not_on_cli() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp_config_path(&tmp);
        LastUsedParams {
            lookback_days: Some(7),
            max_items: Some(25),
            output_dir: None,
            format: Some("html".to_string()),
        }
        .save_to(&path)
        .expect("save");

        let settings =
            Settings::load_with_last_used_impl(os_args(&["opsload", "--mode", "text"]), &path);

        assert_eq!(settings.lookback_days, 7);
        assert_eq!(settings.max_items, 25);
        assert_eq!(settings.format, "html");
    }

    #[test]
    fn test_merge_cli_wins_over_last_used() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp_config_path(&tmp);
        LastUsedParams {
            lookback_days: Some(7),
            ..Default::default()
        }
        .save_to(&path)
        .expect("save");

        let settings = Settings::load_with_last_used_impl(
            os_args(&["opsload", "--mode", "csv", "--lookback-days", "30"]),
            &path,
        );

        assert_eq!(settings.lookback_days, 30);
    }

    #[test]
    fn test_merge_persists_result_for_next_run() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp_config_path(&tmp);

        Settings::load_with_last_used_impl(
            os_args(&["opsload", "--mode", "csv", "--max-items", "42"]),
            &path,
        );

        let saved = LastUsedParams::load_from(&path);
        assert_eq!(saved.max_items, Some(42));
    }

    #[test]
    fn test_clear_removes_saved_params() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp_config_path(&tmp);
        LastUsedParams {
            max_items: Some(42),
            ..Default::default()
        }
        .save_to(&path)
        .expect("save");

        Settings::load_with_last_used_impl(os_args(&["opsload", "--mode", "csv", "--clear"]), &path);

        assert!(!path.exists());
    }

    #[test]
    fn test_debug_flag_overrides_log_level() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp_config_path(&tmp);
        let settings =
            Settings::load_with_last_used_impl(os_args(&["opsload", "--mode", "csv", "--debug"]), &path);
        assert_eq!(settings.log_level, "DEBUG");
    }

    #[test]
    fn test_saved_params_clamped_to_minimums_on_merge() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp_config_path(&tmp);
        // A hand-edited file below the minimums must not bypass them.
        LastUsedParams {
            lookback_days: Some(0),
            max_items: Some(3),
            ..Default::default()
        }
        .save_to(&path)
        .expect("save");

        let settings =
            Settings::load_with_last_used_impl(os_args(&["opsload", "--mode", "csv"]), &path);

        assert_eq!(settings.lookback_days, 1);
        assert_eq!(settings.max_items, 10);
    }
}
