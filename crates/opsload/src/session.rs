//! Session-scoped run state.

use opsload_data::pipeline::Report;

/// Holds the most recent successful report for the current session.
///
/// Export reads from here rather than from an ambient global; a failed run
/// invalidates the held report so stale results are never exported.
#[derive(Debug, Default)]
pub struct SessionState {
    last_report: Option<Report>,
}

impl SessionState {
    /// Store a freshly produced report and return a borrow of it.
    pub fn record(&mut self, report: Report) -> &Report {
        self.last_report.insert(report)
    }

    /// Drop any held report after a failed run.
    pub fn invalidate(&mut self) {
        self.last_report = None;
    }

    /// The report from the most recent successful run, if any.
    pub fn last(&self) -> Option<&Report> {
        self.last_report.as_ref()
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
