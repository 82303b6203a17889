//! Report export to the filesystem.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use opsload_core::error::Result;
use opsload_data::pipeline::Report;
use tracing::info;

/// Write `content` to `path`, creating parent directories as needed.
/// Returns the path written.
pub fn write_report(content: &str, path: &Path) -> Result<PathBuf> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    info!("wrote report to {}", path.display());
    Ok(path.to_path_buf())
}

/// Base file name for one export run: `{report_name}_{YYYYMMDD_HHMMSS}`.
pub fn base_name(report_name: &str, generated_at: DateTime<Utc>) -> String {
    format!("{}_{}", report_name, generated_at.format("%Y%m%d_%H%M%S"))
}

/// Serialize the run summary consumed by scripts wrapping the CLI.
pub fn summary_json(report: &Report, output_files: &[(String, PathBuf)]) -> Result<String> {
    let files: serde_json::Map<String, serde_json::Value> = output_files
        .iter()
        .map(|(kind, path)| {
            (
                kind.clone(),
                serde_json::Value::String(path.display().to_string()),
            )
        })
        .collect();
    let summary = serde_json::json!({
        "items_processed": report.metrics.total_volume,
        "period_days": report.metrics.period_days,
        "estimated_hours_per_week": report.metrics.estimated_hours_per_week,
        "window": report.window_note,
        "fallback_used": report.fallback_used,
        "output_files": files,
    });
    Ok(serde_json::to_string_pretty(&summary)?)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
