//! Row preparation shared by the markdown and HTML renderers.

use opsload_data::aggregate::DiagnosticMetrics;

/// Category breakdown rows, descending by volume:
/// name, count, percent, estimated minutes.
pub fn category_rows(metrics: &DiagnosticMetrics) -> Vec<[String; 4]> {
    let mut rows: Vec<(u32, [String; 4])> = metrics
        .category_counts
        .iter()
        .map(|(category, count)| {
            let pct = metrics
                .category_percentages
                .get(category)
                .copied()
                .unwrap_or(0.0);
            let minutes = metrics
                .estimated_minutes_by_category
                .get(category)
                .copied()
                .unwrap_or(0);
            (
                *count,
                [
                    category.to_string(),
                    count.to_string(),
                    format!("{}%", pct),
                    minutes.to_string(),
                ],
            )
        })
        .collect();
    rows.sort_by(|a, b| b.0.cmp(&a.0));
    rows.into_iter().map(|(_, row)| row).collect()
}

/// Nature breakdown rows: name, count, percent.
pub fn nature_rows(metrics: &DiagnosticMetrics) -> Vec<[String; 3]> {
    metrics
        .nature_counts
        .iter()
        .map(|(nature, count)| {
            let pct = metrics
                .nature_percentages
                .get(nature)
                .copied()
                .unwrap_or(0.0);
            [nature.to_string(), count.to_string(), format!("{}%", pct)]
        })
        .collect()
}

/// SLA cluster rows: category, count, share of SLA-sensitive total.
pub fn sla_rows(metrics: &DiagnosticMetrics) -> Vec<[String; 3]> {
    metrics
        .sla_clusters
        .iter()
        .map(|cluster| {
            [
                cluster.category.to_string(),
                cluster.count.to_string(),
                format!("{}%", cluster.share_of_sla),
            ]
        })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
