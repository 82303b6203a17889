//! Leverage advisory lines derived from aggregated metrics.

use opsload_core::models::{RiskFlag, WorkNature};

use crate::aggregate::DiagnosticMetrics;

/// Derive short advisory lines from a metrics value.
///
/// Pure function with fixed thresholds; the lines are ordered and the
/// empty-batch case short-circuits to a single line.
pub fn leverage_summary(metrics: &DiagnosticMetrics) -> Vec<String> {
    if metrics.total_volume == 0 {
        return vec![
            "No inbound items in selected window; no leverage estimate available.".to_string(),
        ];
    }

    let mut summary = Vec::new();

    let repetitive_pct = metrics
        .nature_percentages
        .get(&WorkNature::Repetitive)
        .copied()
        .unwrap_or(0.0);
    if repetitive_pct >= 50.0 {
        summary.push(format!(
            "{}% of inbound work appears repetitive and is a candidate for templated AI handling.",
            repetitive_pct
        ));
    } else {
        summary.push(format!(
            "Repetitive work is {}%; prioritize exception triage before broad automation.",
            repetitive_pct
        ));
    }

    // Top two categories by raw count; BTreeMap iteration gives canonical
    // order, which the stable sort keeps among equal counts.
    let mut by_count: Vec<(_, u32)> = metrics
        .category_counts
        .iter()
        .map(|(cat, count)| (*cat, *count))
        .collect();
    by_count.sort_by(|a, b| b.1.cmp(&a.1));
    if !by_count.is_empty() {
        let cats = by_count
            .iter()
            .take(2)
            .map(|(cat, count)| format!("{} ({})", cat, count))
            .collect::<Vec<_>>()
            .join(", ");
        summary.push(format!("Highest-load categories: {}.", cats));
    }

    let sla_pct = metrics
        .risk_percentages
        .get(&RiskFlag::SlaSensitive)
        .copied()
        .unwrap_or(0.0);
    if sla_pct > 0.0 {
        summary.push(format!(
            "SLA-sensitive traffic is {}%; retain human-in-the-loop control on these flows.",
            sla_pct
        ));
    } else {
        summary.push("No SLA-sensitive cluster detected in this sample window.".to_string());
    }

    let weekly = metrics.estimated_hours_per_week;
    if weekly >= 10.0 {
        summary.push(format!(
            "Estimated workload is {} hours/week, indicating stronger automation ROI potential.",
            weekly
        ));
    } else {
        summary.push(format!(
            "Estimated workload is {} hours/week; use this as a baseline before deeper implementation.",
            weekly
        ));
    }

    summary
}

// ── Tests ─────────────────────────────────────────────────────────────────────
