//! Markdown rendering of a diagnostic report.

use std::fmt::Write as _;

use opsload_data::pipeline::Report;

use crate::rows::{category_rows, nature_rows, sla_rows};

/// Render `report` as a markdown document.
///
/// `assumptions` are listed verbatim in the closing section, in order.
pub fn render_markdown(report: &Report, assumptions: &[(String, String)]) -> String {
    let metrics = &report.metrics;
    let timestamp = report.generated_at.format("%Y-%m-%d %H:%M");

    let summary_lines = if report.leverage.is_empty() {
        "- _No summary generated_".to_string()
    } else {
        report
            .leverage
            .iter()
            .map(|line| format!("- {}", line))
            .collect::<Vec<_>>()
            .join("\n")
    };
    let assumption_lines = assumptions
        .iter()
        .map(|(key, value)| format!("- **{}**: {}", key, value))
        .collect::<Vec<_>>()
        .join("\n");

    let mut md = String::new();
    let _ = writeln!(md, "# Operations Load Diagnostic Report");
    let _ = writeln!(md);
    let _ = writeln!(md, "Generated: {}", timestamp);
    let _ = writeln!(md);
    let _ = writeln!(md, "## 1. Inbound Volume Snapshot");
    let _ = writeln!(md, "- Total inbound items analyzed: **{}**", metrics.total_volume);
    let _ = writeln!(md, "- Observation window: **{} day(s)**", metrics.period_days);
    let _ = writeln!(md, "- Windowing: {}", report.window_note);
    let _ = writeln!(md);
    let _ = writeln!(md, "## 2. Work Category Breakdown");
    let _ = writeln!(
        md,
        "{}",
        table(
            &["Work Category", "Volume", "% of Inbound", "Estimated Minutes"],
            &category_rows(metrics),
        )
    );
    let _ = writeln!(md);
    let _ = writeln!(md, "## 3. Repetitive vs Exception Work");
    let _ = writeln!(
        md,
        "{}",
        table(&["Work Nature", "Volume", "% of Inbound"], &nature_rows(metrics))
    );
    let _ = writeln!(md);
    let _ = writeln!(md, "## 4. Estimated Operational Load (hours/week)");
    let _ = writeln!(
        md,
        "- Estimated total handling time in sample window: **{} minutes**",
        metrics.estimated_total_minutes
    );
    let _ = writeln!(
        md,
        "- Estimated weekly operational load: **{} hours/week**",
        metrics.estimated_hours_per_week
    );
    let _ = writeln!(md);
    let _ = writeln!(md, "### SLA-sensitive Work Clusters");
    let _ = writeln!(
        md,
        "{}",
        table(
            &["Category", "SLA-sensitive Volume", "Share of SLA-sensitive"],
            &sla_rows(metrics),
        )
    );
    let _ = writeln!(md);
    let _ = writeln!(md, "## 5. Automation Leverage Summary");
    let _ = writeln!(md, "{}", summary_lines);
    let _ = writeln!(md);
    let _ = writeln!(md, "## Conservative Assumptions Used");
    let _ = writeln!(md, "{}", assumption_lines);
    md
}

/// Pipe-table with a `_No data_` placeholder for an empty row set.
fn table<const N: usize>(headers: &[&str; N], rows: &[[String; N]]) -> String {
    if rows.is_empty() {
        return "_No data_".to_string();
    }
    let mut out = String::new();
    let _ = writeln!(out, "| {} |", headers.join(" | "));
    let _ = writeln!(out, "| {} |", vec!["---"; N].join(" | "));
    for row in rows {
        let _ = writeln!(out, "| {} |", row.join(" | "));
    }
    out.trim_end().to_string()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use opsload_core::models::RecordSource;
    use opsload_data::pipeline::{run_diagnostic, DiagnosticOptions};

    const CSV_SAMPLE: &str = "\
timestamp,sender,subject,body
2026-02-10 09:00,ops@acme.test,Where is my shipment? ETA please,Please advise tracking status.
2026-02-11 10:30,ops@acme.test,URGENT customs documents needed today,\"Shipment held, please send BOL ASAP\"
";

    fn sample_report() -> Report {
        run_diagnostic(CSV_SAMPLE, RecordSource::Csv, DiagnosticOptions::default()).unwrap()
    }

    #[test]
    fn test_markdown_has_all_sections() {
        let md = render_markdown(&sample_report(), &[]);
        for heading in [
            "# Operations Load Diagnostic Report",
            "## 1. Inbound Volume Snapshot",
            "## 2. Work Category Breakdown",
            "## 3. Repetitive vs Exception Work",
            "## 4. Estimated Operational Load (hours/week)",
            "### SLA-sensitive Work Clusters",
            "## 5. Automation Leverage Summary",
            "## Conservative Assumptions Used",
        ] {
            assert!(md.contains(heading), "missing {heading}");
        }
    }

    #[test]
    fn test_markdown_tables_and_notes() {
        let md = render_markdown(&sample_report(), &[]);
        assert!(md.contains("| Work Category | Volume | % of Inbound | Estimated Minutes |"));
        assert!(md.contains("| Tracking / ETA | 1 | 50% | 4 |"));
        assert!(md.contains("- Windowing: 14 day lookback"));
    }

    #[test]
    fn test_assumptions_rendered_in_order() {
        let assumptions = vec![
            ("Diagnostic mode".to_string(), "Read-only snapshot.".to_string()),
            ("Window cap".to_string(), "14 day lookback and max 200 items.".to_string()),
        ];
        let md = render_markdown(&sample_report(), &assumptions);
        let first = md.find("**Diagnostic mode**").unwrap();
        let second = md.find("**Window cap**").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_empty_tables_show_placeholder() {
        let mut report = sample_report();
        report.metrics = opsload_data::aggregate::aggregate_metrics(&[], 14);
        report.leverage.clear();
        let md = render_markdown(&report, &[]);
        assert!(md.contains("_No data_"));
        assert!(md.contains("- _No summary generated_"));
    }
}
