//! Timestamp parsing with an ordered fallback chain.
//!
//! Raw timestamp strings arrive in several loose shapes (`2026-02-01 09:30`,
//! ISO 8601 with or without a zone, bare dates). Parsing builds a small
//! ordered list of normalization candidates and accepts the first one that
//! yields a valid instant. Failure is not an error: the record simply has
//! no timestamp.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use tracing::debug;

/// Naive date-time shapes accepted after the RFC 3339 attempt.
/// Interpreted as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M",
];

/// Bare-date shapes, resolved to midnight UTC.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

/// Parse a raw timestamp string into a UTC instant.
///
/// Candidates are tried in order, stopping at the first success:
/// 1. the raw string as-is;
/// 2. the raw string with its first space replaced by `T`;
/// 3. candidate 2 with a `Z` suffix appended unless already present.
///
/// Returns `None` for empty or unrecognisable input.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    for candidate in candidates(raw) {
        if let Some(dt) = parse_candidate(&candidate) {
            return Some(dt);
        }
    }

    debug!("parse_timestamp: no candidate matched \"{}\"", raw);
    None
}

/// Build the ordered normalization candidates for `raw`.
fn candidates(raw: &str) -> Vec<String> {
    let mut out = vec![raw.to_string()];

    let spaced = raw.replacen(' ', "T", 1);
    if spaced != raw {
        out.push(spaced.clone());
    }

    if !spaced.ends_with('Z') {
        out.push(format!("{}Z", spaced));
    }

    out
}

/// Try a single candidate against the known timestamp shapes.
fn parse_candidate(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    // Naive attempts ignore a trailing 'Z'; the value is UTC either way.
    let naive_input = s.strip_suffix('Z').unwrap_or(s);

    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(naive_input, fmt) {
            return Some(naive.and_utc());
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(naive_input, fmt) {
            return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
        }
    }

    None
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_rfc3339_with_z() {
        let dt = parse_timestamp("2026-02-01T09:30:00Z").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2026, 2, 1, 9, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let dt = parse_timestamp("2026-02-01T12:00:00+02:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2026, 2, 1, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_space_separated_datetime() {
        let dt = parse_timestamp("2026-02-01 09:30").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2026, 2, 1, 9, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_space_separated_with_seconds() {
        let dt = parse_timestamp("2026-02-01 09:30:15").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2026, 2, 1, 9, 30, 15).unwrap());
    }

    #[test]
    fn test_parse_naive_iso_datetime() {
        let dt = parse_timestamp("2026-02-01T09:30:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2026, 2, 1, 9, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_bare_date_is_midnight_utc() {
        let dt = parse_timestamp("2026-02-01").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_us_slash_date() {
        let dt = parse_timestamp("02/01/2026").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_empty_returns_none() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("   ").is_none());
    }

    #[test]
    fn test_parse_garbage_returns_none() {
        assert!(parse_timestamp("not-a-date").is_none());
        assert!(parse_timestamp("tomorrow morning").is_none());
    }

    #[test]
    fn test_candidate_order() {
        let c = candidates("2026-02-01 09:30");
        assert_eq!(
            c,
            vec![
                "2026-02-01 09:30".to_string(),
                "2026-02-01T09:30".to_string(),
                "2026-02-01T09:30Z".to_string(),
            ]
        );
    }

    #[test]
    fn test_candidate_no_duplicate_z() {
        let c = candidates("2026-02-01T09:30:00Z");
        assert_eq!(c, vec!["2026-02-01T09:30:00Z".to_string()]);
    }

    #[test]
    fn test_only_first_space_is_replaced() {
        // A second space leaves the candidate unparseable; the raw attempt
        // must not panic and the overall result is None.
        assert!(parse_timestamp("2026-02-01 09:30 extra").is_none());
    }
}
