//! End-to-end diagnostic pipeline.
//!
//! Runs normalize → window → classify → aggregate → advise over one raw
//! input text and produces a single immutable [`Report`].

use chrono::{DateTime, Utc};
use opsload_core::classifier::HeuristicClassifier;
use opsload_core::error::{DiagnosticError, Result};
use opsload_core::models::{ClassifiedRecord, RecordSource};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::advisor::leverage_summary;
use crate::aggregate::{aggregate_metrics, DiagnosticMetrics};
use crate::normalizer::{normalize_csv, normalize_text_blocks};
use crate::window::select_window;

// ── DiagnosticOptions ─────────────────────────────────────────────────────────

/// Tunables for one diagnostic run.
#[derive(Debug, Clone, Copy)]
pub struct DiagnosticOptions {
    /// Lookback window in days, minimum 1.
    pub lookback_days: u32,
    /// Maximum records analyzed, minimum 10.
    pub max_items: usize,
}

impl Default for DiagnosticOptions {
    fn default() -> Self {
        Self {
            lookback_days: 14,
            max_items: 200,
        }
    }
}

// ── Report ────────────────────────────────────────────────────────────────────

/// The terminal output of one pipeline run. Immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub metrics: DiagnosticMetrics,
    /// Advisory lines from the leverage advisor, in order.
    pub leverage: Vec<String>,
    /// Human-readable description of the windowing policy that applied.
    pub window_note: String,
    pub fallback_used: bool,
}

// ── run_diagnostic ────────────────────────────────────────────────────────────

/// Run the full diagnostic over `text`, interpreted per `source`.
///
/// Returns [`DiagnosticError::EmptyInput`] when normalization yields no
/// records with content.
pub fn run_diagnostic(
    text: &str,
    source: RecordSource,
    options: DiagnosticOptions,
) -> Result<Report> {
    let records = match source {
        RecordSource::Csv => normalize_csv(text),
        RecordSource::Text => normalize_text_blocks(text),
    };
    if records.is_empty() {
        return Err(DiagnosticError::EmptyInput);
    }
    debug!("run_diagnostic: normalized {} records", records.len());

    let selection = select_window(records, options.lookback_days, options.max_items);

    let classifier = HeuristicClassifier::default();
    let classified: Vec<ClassifiedRecord> = selection
        .records
        .into_iter()
        .map(|record| {
            let classification = classifier.classify(&record);
            ClassifiedRecord {
                record,
                classification,
            }
        })
        .collect();

    let metrics = aggregate_metrics(&classified, options.lookback_days);
    let leverage = leverage_summary(&metrics);

    let window_note = if selection.fallback_used {
        format!(
            "{} day lookback requested; window was empty, fell back to the latest {} records (anchor {})",
            options.lookback_days,
            classified.len(),
            selection.anchor.format("%Y-%m-%d")
        )
    } else {
        format!(
            "{} day lookback anchored to {} ({} of max {} items)",
            options.lookback_days,
            selection.anchor.format("%Y-%m-%d"),
            classified.len(),
            options.max_items
        )
    };

    info!(
        "diagnostic complete: {} items, {} estimated hours/week",
        metrics.total_volume, metrics.estimated_hours_per_week
    );

    Ok(Report {
        generated_at: Utc::now(),
        metrics,
        leverage,
        window_note,
        fallback_used: selection.fallback_used,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
