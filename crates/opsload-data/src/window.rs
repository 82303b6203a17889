//! Lookback window selection.
//!
//! The window is anchored to the most recent timestamp found in the batch,
//! not to the wall clock, so an old sample file still yields a meaningful
//! window. When the window would exclude every record the selector falls
//! back to the most recent records up to the cap, guaranteeing the
//! pipeline never stalls on an empty window.

use chrono::{DateTime, TimeDelta, Utc};
use opsload_core::models::InboundRecord;
use std::cmp::Reverse;
use tracing::debug;

// ── WindowSelection ───────────────────────────────────────────────────────────

/// The outcome of applying the lookback window to a batch.
#[derive(Debug, Clone)]
pub struct WindowSelection {
    /// Selected records, sorted by effective time descending.
    pub records: Vec<InboundRecord>,
    /// The instant the window was measured from: the latest record
    /// timestamp, or "now" when no record carries one.
    pub anchor: DateTime<Utc>,
    /// `true` when the window excluded everything and the most recent
    /// records were taken instead.
    pub fallback_used: bool,
}

// ── select_window ─────────────────────────────────────────────────────────────

/// Select the working subset of `records` for analysis.
///
/// Records are sorted descending by effective time, where a record without
/// a timestamp counts as occurring at the anchor instant: untimed records
/// sort as most recent and always pass the window. A record passes when
/// its timestamp is on or after `anchor - lookback_days`. If nothing
/// passes, the first `max_items` of the full sorted batch are returned
/// with `fallback_used` set.
pub fn select_window(
    records: Vec<InboundRecord>,
    lookback_days: u32,
    max_items: usize,
) -> WindowSelection {
    let anchor = records
        .iter()
        .filter_map(|r| r.timestamp)
        .max()
        .unwrap_or_else(Utc::now);
    let threshold = anchor - TimeDelta::days(i64::from(lookback_days));

    let mut sorted = records;
    // Stable sort: equal effective times keep their input order.
    sorted.sort_by_key(|r| Reverse(r.timestamp.unwrap_or(anchor)));

    let passing: Vec<InboundRecord> = sorted
        .iter()
        .filter(|r| r.timestamp.map_or(true, |ts| ts >= threshold))
        .cloned()
        .collect();

    if !passing.is_empty() {
        let mut records = passing;
        records.truncate(max_items);
        debug!(
            "select_window: {} records within {} day window (anchor {})",
            records.len(),
            lookback_days,
            anchor
        );
        return WindowSelection {
            records,
            anchor,
            fallback_used: false,
        };
    }

    sorted.truncate(max_items);
    debug!(
        "select_window: window empty, falling back to latest {} records",
        sorted.len()
    );
    WindowSelection {
        records: sorted,
        anchor,
        fallback_used: true,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
