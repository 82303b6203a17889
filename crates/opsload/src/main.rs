mod bootstrap;
mod session;

use anyhow::{bail, Context, Result};
use opsload_core::models::{RecordSource, WorkCategory};
use opsload_core::settings::Settings;
use opsload_data::pipeline::{run_diagnostic, DiagnosticOptions, Report};
use opsload_report::{html, markdown, writer};

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("opsload v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Mode: {}, Lookback: {} days, Cap: {} items",
        settings.mode,
        settings.lookback_days,
        settings.max_items
    );

    let source = match settings.mode.as_str() {
        "csv" => RecordSource::Csv,
        "text" => RecordSource::Text,
        unknown => bail!("unsupported mode: {}", unknown),
    };
    let Some(input) = settings.input.as_deref() else {
        bail!("--input is required for csv/text mode");
    };

    let text = tokio::fs::read_to_string(input)
        .await
        .with_context(|| format!("failed to read input file {}", input.display()))?;

    let options = DiagnosticOptions {
        lookback_days: settings.lookback_days,
        max_items: settings.max_items as usize,
    };

    let mut session = session::SessionState::default();
    let report = match run_diagnostic(&text, source, options) {
        Ok(report) => session.record(report),
        Err(err) => {
            session.invalidate();
            return Err(err.into());
        }
    };

    let summary = export_report(report, &settings)?;
    println!("{}", summary);

    Ok(())
}

/// Render and write the requested report formats plus the run summary.
/// Returns the summary JSON printed to stdout.
fn export_report(report: &Report, settings: &Settings) -> Result<String> {
    let assumptions = assumptions(settings);
    let base = writer::base_name(&settings.report_name, report.generated_at);

    let mut output_files = Vec::new();
    if matches!(settings.format.as_str(), "markdown" | "both") {
        let path = settings.output_dir.join(format!("{}.md", base));
        writer::write_report(&markdown::render_markdown(report, &assumptions), &path)?;
        output_files.push(("markdown".to_string(), path));
    }
    if matches!(settings.format.as_str(), "html" | "both") {
        let path = settings.output_dir.join(format!("{}.html", base));
        writer::write_report(&html::render_html(report, &assumptions), &path)?;
        output_files.push(("html".to_string(), path));
    }

    let summary = writer::summary_json(report, &output_files)?;
    writer::write_report(
        &summary,
        &settings.output_dir.join(format!("{}.summary.json", base)),
    )?;
    Ok(summary)
}

/// The conservative assumptions listed at the bottom of every report.
fn assumptions(settings: &Settings) -> Vec<(String, String)> {
    let handling = WorkCategory::CANONICAL
        .iter()
        .map(|category| format!("{}: {}", category, category.handling_minutes()))
        .collect::<Vec<_>>()
        .join(", ");

    vec![
        (
            "Diagnostic mode".to_string(),
            "Read-only, one-time static snapshot; no workflow changes.".to_string(),
        ),
        (
            "Window cap".to_string(),
            format!(
                "{} day lookback and max {} items.",
                settings.lookback_days, settings.max_items
            ),
        ),
        (
            "Handling time defaults (minutes/category)".to_string(),
            handling,
        ),
        (
            "Classifier".to_string(),
            "heuristic keyword matching".to_string(),
        ),
        (
            "Accuracy expectation".to_string(),
            "Directionally correct prioritization, not perfect labeling.".to_string(),
        ),
    ]
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    fn sample_report() -> Report {
        let csv = "\
timestamp,subject,body
2026-02-10 09:00,ETA please,tracking status
2026-02-11 10:30,URGENT customs documents needed today,send BOL ASAP
";
        run_diagnostic(csv, RecordSource::Csv, DiagnosticOptions::default()).unwrap()
    }

    fn settings_for(dir: &std::path::Path, format: &str) -> Settings {
        Settings::parse_from([
            "opsload",
            "--mode",
            "csv",
            "--output-dir",
            dir.to_str().unwrap(),
            "--format",
            format,
        ])
    }

    #[test]
    fn test_export_both_formats_and_summary() {
        let tmp = TempDir::new().expect("tempdir");
        let settings = settings_for(tmp.path(), "both");

        let summary = export_report(&sample_report(), &settings).expect("export");

        let json: serde_json::Value = serde_json::from_str(&summary).unwrap();
        assert_eq!(json["items_processed"], 2);

        let entries: Vec<_> = std::fs::read_dir(tmp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert!(entries.iter().any(|n| n.ends_with(".md")));
        assert!(entries.iter().any(|n| n.ends_with(".html")));
        assert!(entries.iter().any(|n| n.ends_with(".summary.json")));
    }

    #[test]
    fn test_export_markdown_only() {
        let tmp = TempDir::new().expect("tempdir");
        let settings = settings_for(tmp.path(), "markdown");

        export_report(&sample_report(), &settings).expect("export");

        let entries: Vec<_> = std::fs::read_dir(tmp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert!(entries.iter().any(|n| n.ends_with(".md")));
        assert!(!entries.iter().any(|n| n.ends_with(".html")));
    }

    #[test]
    fn test_assumptions_list_handling_minutes() {
        let tmp = TempDir::new().expect("tempdir");
        let settings = settings_for(tmp.path(), "both");
        let assumptions = assumptions(&settings);

        let handling = &assumptions
            .iter()
            .find(|(k, _)| k.starts_with("Handling time"))
            .unwrap()
            .1;
        assert!(handling.contains("Tracking / ETA: 4"));
        assert!(handling.contains("Exception / Delay: 12"));
        assert!(handling.contains("Other: 5"));
    }
}
