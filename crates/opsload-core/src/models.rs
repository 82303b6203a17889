use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ── WorkCategory ──────────────────────────────────────────────────────────────

/// Work type assigned to an inbound message.
///
/// Declaration order is the canonical order: it drives the classifier's
/// tie-break (earlier category wins a tied score) and the `Ord` used for
/// deterministic map iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WorkCategory {
    /// "Where is my shipment" style status and ETA requests.
    #[serde(rename = "Tracking / ETA")]
    TrackingEta,
    /// Delays, holds, damage, escalations and other service failures.
    #[serde(rename = "Exception / Delay")]
    ExceptionDelay,
    /// Invoices, PODs, customs paperwork and certificates.
    #[serde(rename = "Documentation")]
    Documentation,
    /// Quotes, tariffs and other commercial pricing requests.
    #[serde(rename = "Rate / Pricing")]
    RatePricing,
    /// Warehouse, dispatch and other intra-team coordination.
    #[serde(rename = "Internal Coordination")]
    InternalCoordination,
    /// No category-specific keyword matched.
    #[serde(rename = "Other")]
    Other,
}

impl WorkCategory {
    /// All categories in canonical order, `Other` last.
    pub const CANONICAL: [WorkCategory; 6] = [
        WorkCategory::TrackingEta,
        WorkCategory::ExceptionDelay,
        WorkCategory::Documentation,
        WorkCategory::RatePricing,
        WorkCategory::InternalCoordination,
        WorkCategory::Other,
    ];

    /// The human-readable label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            WorkCategory::TrackingEta => "Tracking / ETA",
            WorkCategory::ExceptionDelay => "Exception / Delay",
            WorkCategory::Documentation => "Documentation",
            WorkCategory::RatePricing => "Rate / Pricing",
            WorkCategory::InternalCoordination => "Internal Coordination",
            WorkCategory::Other => "Other",
        }
    }

    /// Assumed average minutes to resolve one item of this category.
    ///
    /// Conservative per-category baselines; any category missing from the
    /// table falls back to the `Other` default.
    pub fn handling_minutes(&self) -> u32 {
        const TABLE: &[(WorkCategory, u32)] = &[
            (WorkCategory::TrackingEta, 4),
            (WorkCategory::ExceptionDelay, 12),
            (WorkCategory::Documentation, 7),
            (WorkCategory::RatePricing, 8),
            (WorkCategory::InternalCoordination, 6),
        ];
        TABLE
            .iter()
            .find(|(cat, _)| cat == self)
            .map(|(_, minutes)| *minutes)
            .unwrap_or(DEFAULT_HANDLING_MINUTES)
    }
}

/// Fallback handling time, also used for [`WorkCategory::Other`].
pub const DEFAULT_HANDLING_MINUTES: u32 = 5;

impl fmt::Display for WorkCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── WorkNature ────────────────────────────────────────────────────────────────

/// Whether an item looks like routine work or exception handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WorkNature {
    #[serde(rename = "Repetitive")]
    Repetitive,
    #[serde(rename = "Exception-driven")]
    ExceptionDriven,
}

impl WorkNature {
    pub fn label(&self) -> &'static str {
        match self {
            WorkNature::Repetitive => "Repetitive",
            WorkNature::ExceptionDriven => "Exception-driven",
        }
    }
}

impl fmt::Display for WorkNature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── RiskFlag ──────────────────────────────────────────────────────────────────

/// Whether an item likely carries a service-level deadline risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskFlag {
    #[serde(rename = "SLA-sensitive")]
    SlaSensitive,
    #[serde(rename = "Not SLA-sensitive")]
    NotSlaSensitive,
}

impl RiskFlag {
    pub fn label(&self) -> &'static str {
        match self {
            RiskFlag::SlaSensitive => "SLA-sensitive",
            RiskFlag::NotSlaSensitive => "Not SLA-sensitive",
        }
    }
}

impl fmt::Display for RiskFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── RecordSource ──────────────────────────────────────────────────────────────

/// Which input dialect produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordSource {
    /// Delimited tabular input with a header row.
    Csv,
    /// `---`-separated free-text blocks.
    Text,
}

// ── InboundRecord ─────────────────────────────────────────────────────────────

/// One normalized inbound message.
///
/// Records are produced by the normalizer, which assigns the `id` and drops
/// any row/block whose subject and body are both empty after trimming.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundRecord {
    /// Stable identifier, unique within the batch (e.g. `"csv-3"`).
    pub id: String,
    /// When the message arrived; `None` when missing or unparseable.
    pub timestamp: Option<DateTime<Utc>>,
    /// Free-text sender, when present.
    pub sender: Option<String>,
    /// Subject line; synthesized from the body when absent.
    pub subject: String,
    /// Message body text.
    pub body: String,
    /// The input dialect this record came from.
    pub source: RecordSource,
}

impl InboundRecord {
    /// Whether the record carries any analyzable text.
    ///
    /// The normalizer drops records for which this is `false`.
    pub fn has_content(&self) -> bool {
        !self.subject.trim().is_empty() || !self.body.trim().is_empty()
    }
}

// ── Classification ────────────────────────────────────────────────────────────

/// The classifier's verdict for a single record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classification {
    pub category: WorkCategory,
    pub nature: WorkNature,
    pub risk: RiskFlag,
    /// Confidence in `[0.5, 0.95]`, rounded to 2 decimals.
    pub confidence: f64,
}

/// A record paired with its classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifiedRecord {
    pub record: InboundRecord,
    pub classification: Classification,
}

// ── Tests ─────────────────────────────────────────────────────────────────────
