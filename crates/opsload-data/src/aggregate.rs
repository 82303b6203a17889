//! Workload metric aggregation over a classified batch.
//!
//! Produces the immutable [`DiagnosticMetrics`] value: volume, category /
//! nature / risk distributions, handling-time estimates and SLA-sensitive
//! clustering. Aggregation is a total function; an empty batch yields a
//! zeroed metrics value rather than an error.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use opsload_core::models::{ClassifiedRecord, RiskFlag, WorkCategory, WorkNature};
use serde::{Deserialize, Serialize};
use tracing::debug;

// ── SlaCluster ────────────────────────────────────────────────────────────────

/// One category's share of the SLA-sensitive workload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlaCluster {
    pub category: WorkCategory,
    pub count: u32,
    /// Percentage of all SLA-sensitive items, rounded to 1 decimal.
    pub share_of_sla: f64,
}

// ── DiagnosticMetrics ─────────────────────────────────────────────────────────

/// Aggregated workload statistics for one diagnostic run.
///
/// A pure value object: constructed once by [`aggregate_metrics`] and never
/// mutated. Maps only contain keys that actually occurred; a zero count is
/// expressed by absence. `BTreeMap` keeps iteration in canonical order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticMetrics {
    /// Number of records analyzed.
    pub total_volume: u32,
    /// Whole days spanned by the observed timestamps (inclusive, minimum 1),
    /// or the requested lookback when no record carries a timestamp.
    pub period_days: u32,
    pub category_counts: BTreeMap<WorkCategory, u32>,
    /// Percent of total volume per category, rounded to 1 decimal.
    pub category_percentages: BTreeMap<WorkCategory, f64>,
    pub nature_counts: BTreeMap<WorkNature, u32>,
    pub nature_percentages: BTreeMap<WorkNature, f64>,
    pub risk_counts: BTreeMap<RiskFlag, u32>,
    pub risk_percentages: BTreeMap<RiskFlag, f64>,
    /// `count × handling minutes` per category.
    pub estimated_minutes_by_category: BTreeMap<WorkCategory, u32>,
    pub estimated_total_minutes: u32,
    /// Total minutes as hours, scaled to a 7-day week over `period_days`.
    /// Assumes workload is evenly distributed across the observed period.
    pub estimated_hours_per_week: f64,
    /// SLA-sensitive counts per category, descending by count.
    pub sla_clusters: Vec<SlaCluster>,
}

impl DiagnosticMetrics {
    /// The zero-valued metrics used for an empty batch.
    fn empty(fallback_period_days: u32) -> Self {
        Self {
            total_volume: 0,
            period_days: fallback_period_days,
            category_counts: BTreeMap::new(),
            category_percentages: BTreeMap::new(),
            nature_counts: BTreeMap::new(),
            nature_percentages: BTreeMap::new(),
            risk_counts: BTreeMap::new(),
            risk_percentages: BTreeMap::new(),
            estimated_minutes_by_category: BTreeMap::new(),
            estimated_total_minutes: 0,
            estimated_hours_per_week: 0.0,
            sla_clusters: Vec::new(),
        }
    }
}

// ── aggregate_metrics ─────────────────────────────────────────────────────────

/// Compute [`DiagnosticMetrics`] over a classified batch.
///
/// `fallback_period_days` is the requested lookback; it becomes
/// `period_days` when the batch is empty or no record has a timestamp.
pub fn aggregate_metrics(
    records: &[ClassifiedRecord],
    fallback_period_days: u32,
) -> DiagnosticMetrics {
    let total = records.len() as u32;
    if total == 0 {
        return DiagnosticMetrics::empty(fallback_period_days);
    }

    let period_days = observed_period_days(records).unwrap_or(fallback_period_days);

    let category_counts = count_by(records, |r| r.classification.category);
    let nature_counts = count_by(records, |r| r.classification.nature);
    let risk_counts = count_by(records, |r| r.classification.risk);

    let category_percentages = percentages(&category_counts, total);
    let nature_percentages = percentages(&nature_counts, total);
    let risk_percentages = percentages(&risk_counts, total);

    let estimated_minutes_by_category: BTreeMap<WorkCategory, u32> = category_counts
        .iter()
        .map(|(cat, count)| (*cat, count * cat.handling_minutes()))
        .collect();
    let estimated_total_minutes: u32 = estimated_minutes_by_category.values().sum();

    let estimated_hours_per_week = round1(
        (f64::from(estimated_total_minutes) / 60.0) * (7.0 / f64::from(period_days)),
    );

    let sla_clusters = sla_clusters(records);

    debug!(
        "aggregate_metrics: {} records over {} day(s), {} estimated minutes",
        total, period_days, estimated_total_minutes
    );

    DiagnosticMetrics {
        total_volume: total,
        period_days,
        category_counts,
        category_percentages,
        nature_counts,
        nature_percentages,
        risk_counts,
        risk_percentages,
        estimated_minutes_by_category,
        estimated_total_minutes,
        estimated_hours_per_week,
        sla_clusters,
    }
}

// ── Private helpers ───────────────────────────────────────────────────────────

/// Whole days spanned between the earliest and latest timestamp,
/// inclusive, minimum 1. `None` when no record has a timestamp.
fn observed_period_days(records: &[ClassifiedRecord]) -> Option<u32> {
    let timestamps = records.iter().filter_map(|r| r.record.timestamp);
    let min = timestamps.clone().min()?;
    let max = timestamps.max()?;
    let days = (max - min).num_days() + 1;
    Some(days.max(1) as u32)
}

/// Count records per key; absent keys mean zero.
fn count_by<K: Ord + Copy>(
    records: &[ClassifiedRecord],
    key: impl Fn(&ClassifiedRecord) -> K,
) -> BTreeMap<K, u32> {
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(key(record)).or_insert(0) += 1;
    }
    counts
}

/// Convert a count map into percentages of `total`, rounded to 1 decimal.
fn percentages<K: Ord + Copy>(counts: &BTreeMap<K, u32>, total: u32) -> BTreeMap<K, f64> {
    counts
        .iter()
        .map(|(k, count)| (*k, pct(*count, total)))
        .collect()
}

/// `count / total × 100` rounded to 1 decimal; 0 when `total` is 0.
fn pct(count: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round1(f64::from(count) / f64::from(total) * 100.0)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Cluster SLA-sensitive records by category, descending by count.
fn sla_clusters(records: &[ClassifiedRecord]) -> Vec<SlaCluster> {
    let mut by_category: BTreeMap<WorkCategory, u32> = BTreeMap::new();
    for record in records {
        if record.classification.risk == RiskFlag::SlaSensitive {
            *by_category.entry(record.classification.category).or_insert(0) += 1;
        }
    }

    let total_sla: u32 = by_category.values().sum();
    let mut clusters: Vec<SlaCluster> = by_category
        .into_iter()
        .map(|(category, count)| SlaCluster {
            category,
            count,
            share_of_sla: pct(count, total_sla),
        })
        .collect();

    // Descending by count; the BTreeMap already yields canonical order,
    // which the stable sort preserves among equal counts.
    clusters.sort_by_key(|c| Reverse(c.count));
    clusters
}

// ── Tests ─────────────────────────────────────────────────────────────────────
