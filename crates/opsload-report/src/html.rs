//! Standalone HTML rendering of a diagnostic report.

use opsload_data::pipeline::Report;

use crate::rows::{category_rows, nature_rows, sla_rows};

/// Render `report` as a self-contained HTML document (inline styles,
/// no external assets).
pub fn render_html(report: &Report, assumptions: &[(String, String)]) -> String {
    let metrics = &report.metrics;
    let timestamp = report.generated_at.format("%Y-%m-%d %H:%M");

    let summary_list = if report.leverage.is_empty() {
        "<li>No summary generated</li>".to_string()
    } else {
        report
            .leverage
            .iter()
            .map(|line| format!("<li>{}</li>", escape(line)))
            .collect::<String>()
    };
    let assumption_list = assumptions
        .iter()
        .map(|(key, value)| format!("<li><strong>{}</strong>: {}</li>", escape(key), escape(value)))
        .collect::<String>();

    format!(
        r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>Operations Load Diagnostic Report</title>
  <style>
    body {{
      font-family: "Segoe UI", Tahoma, sans-serif;
      margin: 32px;
      color: #111;
      line-height: 1.45;
    }}
    h1, h2, h3 {{ margin-top: 24px; }}
    table {{
      width: 100%;
      border-collapse: collapse;
      margin: 12px 0 18px 0;
    }}
    th, td {{
      border: 1px solid #d4d4d4;
      padding: 8px;
      text-align: left;
    }}
    th {{ background: #f5f5f5; }}
    .kpi {{
      background: #f9fafb;
      border: 1px solid #e5e7eb;
      padding: 12px;
      margin: 8px 0;
    }}
  </style>
</head>
<body>
  <h1>Operations Load Diagnostic Report</h1>
  <p>Generated: {timestamp}</p>
  <p>{window_note}</p>

  <h2>1. Inbound Volume Snapshot</h2>
  <div class="kpi">Total inbound items analyzed: <strong>{total_volume}</strong></div>
  <div class="kpi">Observation window: <strong>{period_days} day(s)</strong></div>

  <h2>2. Work Category Breakdown</h2>
  <table>
    <thead><tr><th>Work Category</th><th>Volume</th><th>% of Inbound</th><th>Estimated Minutes</th></tr></thead>
    <tbody>{category_body}</tbody>
  </table>

  <h2>3. Repetitive vs Exception Work</h2>
  <table>
    <thead><tr><th>Work Nature</th><th>Volume</th><th>% of Inbound</th></tr></thead>
    <tbody>{nature_body}</tbody>
  </table>

  <h2>4. Estimated Operational Load (hours/week)</h2>
  <div class="kpi">Sample handling time: <strong>{total_minutes} minutes</strong></div>
  <div class="kpi">Estimated weekly load: <strong>{weekly_hours} hours/week</strong></div>

  <h3>SLA-sensitive Work Clusters</h3>
  <table>
    <thead><tr><th>Category</th><th>SLA-sensitive Volume</th><th>Share of SLA-sensitive</th></tr></thead>
    <tbody>{sla_body}</tbody>
  </table>

  <h2>5. Automation Leverage Summary</h2>
  <ul>{summary_list}</ul>

  <h2>Conservative Assumptions Used</h2>
  <ul>{assumption_list}</ul>
</body>
</html>"#,
        timestamp = timestamp,
        window_note = escape(&report.window_note),
        total_volume = metrics.total_volume,
        period_days = metrics.period_days,
        category_body = table_body(&category_rows(metrics)),
        nature_body = table_body(&nature_rows(metrics)),
        total_minutes = metrics.estimated_total_minutes,
        weekly_hours = metrics.estimated_hours_per_week,
        sla_body = table_body(&sla_rows(metrics)),
        summary_list = summary_list,
        assumption_list = assumption_list,
    )
}

fn table_body<const N: usize>(rows: &[[String; N]]) -> String {
    if rows.is_empty() {
        return format!("<tr><td colspan='{}'>No data</td></tr>", N);
    }
    rows.iter()
        .map(|row| {
            let cells: String = row
                .iter()
                .map(|cell| format!("<td>{}</td>", escape(cell)))
                .collect();
            format!("<tr>{}</tr>", cells)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Minimal HTML escaping for text content.
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

// ── Tests ─────────────────────────────────────────────────────────────────────
