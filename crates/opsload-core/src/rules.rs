//! Keyword rule tables for the heuristic classifier.
//!
//! The classifier is table-driven: an ordered list of per-category keyword
//! phrases, a separate urgency/failure list for the work-nature decision,
//! and a deadline/urgency list for the SLA-risk decision. The list order
//! for categories is the canonical order and doubles as the tie-break.

use crate::models::WorkCategory;

// ── RuleSet ───────────────────────────────────────────────────────────────────

/// All keyword tables used by the classifier.
///
/// Keywords are lowercase phrases matched as substrings against the
/// lowercased subject + body text.
#[derive(Debug, Clone)]
pub struct RuleSet {
    /// Per-category keyword phrases, in canonical category order.
    /// `Other` has no entry; it is the no-match fallback.
    pub category_keywords: Vec<(WorkCategory, Vec<&'static str>)>,
    /// Urgency/failure phrases that mark an item Exception-driven
    /// regardless of its category.
    pub exception_keywords: Vec<&'static str>,
    /// Deadline/urgency phrases that mark an item SLA-sensitive.
    pub sla_keywords: Vec<&'static str>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            category_keywords: vec![
                (
                    WorkCategory::TrackingEta,
                    vec![
                        "eta",
                        "track",
                        "tracking",
                        "status update",
                        "where is",
                        "arrival time",
                        "delivery time",
                        "in transit",
                    ],
                ),
                (
                    WorkCategory::ExceptionDelay,
                    vec![
                        "delay",
                        "late",
                        "missed",
                        "issue",
                        "problem",
                        "stuck",
                        "hold",
                        "damaged",
                        "shortage",
                        "escalat",
                        "failed delivery",
                        "cancelled",
                        "detention",
                        "demurrage",
                    ],
                ),
                (
                    WorkCategory::Documentation,
                    vec![
                        "invoice",
                        "pod",
                        "bill of lading",
                        "bol",
                        "awb",
                        "packing list",
                        "customs",
                        "document",
                        "paperwork",
                        "declaration",
                        "certificate",
                        "forms",
                    ],
                ),
                (
                    WorkCategory::RatePricing,
                    vec![
                        "rate",
                        "pricing",
                        "quote",
                        "quotation",
                        "cost",
                        "charge",
                        "tariff",
                        "spot rate",
                    ],
                ),
                (
                    WorkCategory::InternalCoordination,
                    vec![
                        "please coordinate",
                        "warehouse",
                        "dispatch",
                        "driver",
                        "pickup schedule",
                        "handover",
                        "internal",
                        "team",
                        "ops",
                        "arrange pickup",
                    ],
                ),
            ],
            exception_keywords: vec![
                "urgent", "escalat", "problem", "failed", "delay", "late", "stuck", "damage",
                "asap", "critical",
            ],
            sla_keywords: vec![
                "urgent",
                "asap",
                "today",
                "immediately",
                "deadline",
                "cutoff",
                "cut-off",
                "demurrage",
                "detention",
                "customer waiting",
                "sla",
                "missed",
            ],
        }
    }
}

/// Return `true` when any phrase occurs as a substring of `text`.
///
/// `text` must already be lowercased.
pub fn contains_any(text: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|p| text.contains(p))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
