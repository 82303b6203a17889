//! Heuristic keyword classifier.
//!
//! A pure function of one [`InboundRecord`]: subject and body are
//! concatenated, lowercased, and scored against the [`RuleSet`] keyword
//! tables. No state is shared between records and classification cannot
//! fail.

use crate::models::{Classification, InboundRecord, RiskFlag, WorkCategory, WorkNature};
use crate::rules::{contains_any, RuleSet};

// ── HeuristicClassifier ───────────────────────────────────────────────────────

/// Deterministic keyword-scoring classifier.
#[derive(Debug, Clone, Default)]
pub struct HeuristicClassifier {
    rules: RuleSet,
}

impl HeuristicClassifier {
    /// Create a classifier with a custom rule set.
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    /// Classify one record.
    ///
    /// Category selection: each category's keywords are counted (one point
    /// per keyword present, regardless of repeats); the scan walks the
    /// canonical category order and keeps the first strictly-highest score,
    /// so an earlier category wins ties. A zero top score falls back to
    /// `Other`.
    pub fn classify(&self, record: &InboundRecord) -> Classification {
        let text = format!("{}\n{}", record.subject, record.body).to_lowercase();

        let mut category = WorkCategory::Other;
        let mut top_score = 0usize;
        for (candidate, keywords) in &self.rules.category_keywords {
            let score = keywords.iter().filter(|kw| text.contains(*kw)).count();
            if score > top_score {
                top_score = score;
                category = *candidate;
            }
        }

        let is_exception = category == WorkCategory::ExceptionDelay
            || contains_any(&text, &self.rules.exception_keywords);
        let nature = if is_exception {
            WorkNature::ExceptionDriven
        } else {
            WorkNature::Repetitive
        };

        // The exception-category "urgent" check intentionally duplicates a
        // phrase already in the SLA list; the duplication is part of the
        // contract.
        let is_sla = contains_any(&text, &self.rules.sla_keywords)
            || (category == WorkCategory::ExceptionDelay && text.contains("urgent"));
        let risk = if is_sla {
            RiskFlag::SlaSensitive
        } else {
            RiskFlag::NotSlaSensitive
        };

        let confidence = if category == WorkCategory::Other {
            0.5
        } else {
            round2(f64::min(0.95, 0.55 + top_score as f64 * 0.1))
        };

        Classification {
            category,
            nature,
            risk,
            confidence,
        }
    }
}

/// Round to 2 decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ── Tests ─────────────────────────────────────────────────────────────────────
