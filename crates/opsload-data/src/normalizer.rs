//! Record normalization for the two supported input dialects.
//!
//! Tabular mode parses comma-separated text with standard double-quote
//! quoting and a fixed, case-insensitive header vocabulary. Free-text-block
//! mode splits the input on `---` separator lines and scans each block for
//! optional header lines. Both produce the same [`InboundRecord`] shape;
//! rows/blocks without any usable text are dropped.

use opsload_core::models::{InboundRecord, RecordSource};
use opsload_core::timestamp::parse_timestamp;
use regex::Regex;
use tracing::debug;

// ── Tabular (CSV) mode ────────────────────────────────────────────────────────

/// Parse tabular text into inbound records.
///
/// The first row is the header; the columns `timestamp`, `sender`,
/// `subject` and `body` are matched case-insensitively and any missing
/// column is treated as absent for all rows. Record ids are `"csv-"`
/// plus the 1-based data-row index, assigned before the content filter
/// so dropped rows still consume an index.
pub fn normalize_csv(text: &str) -> Vec<InboundRecord> {
    let rows = parse_csv_rows(text);
    if rows.len() < 2 {
        return Vec::new();
    }

    let headers: Vec<String> = rows[0].iter().map(|h| h.trim().to_lowercase()).collect();
    let col = |name: &str| headers.iter().position(|h| h == name);
    let ts_col = col("timestamp");
    let sender_col = col("sender");
    let subject_col = col("subject");
    let body_col = col("body");

    let cell = |row: &[String], idx: Option<usize>| -> String {
        idx.and_then(|i| row.get(i))
            .map(|v| v.trim().to_string())
            .unwrap_or_default()
    };

    let records: Vec<InboundRecord> = rows[1..]
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let sender = cell(row, sender_col);
            InboundRecord {
                id: format!("csv-{}", i + 1),
                timestamp: ts_col
                    .and_then(|c| row.get(c))
                    .and_then(|raw| parse_timestamp(raw)),
                sender: (!sender.is_empty()).then_some(sender),
                subject: cell(row, subject_col),
                body: cell(row, body_col),
                source: RecordSource::Csv,
            }
        })
        .filter(InboundRecord::has_content)
        .collect();

    debug!(
        "normalize_csv: {} usable records from {} data rows",
        records.len(),
        rows.len() - 1
    );
    records
}

/// Split raw CSV text into rows of fields.
///
/// Standard quoting rules: a double-quoted field may contain commas and
/// line breaks, and a doubled quote inside a quoted field is one literal
/// quote. Rows whose every cell is blank are discarded.
fn parse_csv_rows(text: &str) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;

    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes && chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => {
                row.push(std::mem::take(&mut field));
            }
            '\r' | '\n' if !in_quotes => {
                if ch == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
            }
            _ => field.push(ch),
        }
    }

    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows.into_iter()
        .filter(|r| r.iter().any(|cell| !cell.trim().is_empty()))
        .collect()
}

// ── Free-text-block mode ──────────────────────────────────────────────────────

/// Parse `---`-separated free-text blocks into inbound records.
///
/// Within a block, `timestamp:` / `sender:` / `subject:` header lines are
/// scanned case-insensitively. A line consisting solely of `body:` marks
/// the start of the body; everything after it is taken verbatim. Without
/// the marker the whole block is the body. A missing subject is
/// synthesized from the first non-blank body line, truncated to 80
/// characters with a trailing ellipsis.
pub fn normalize_text_blocks(text: &str) -> Vec<InboundRecord> {
    let separator = Regex::new(r"(?m)^\s*---\s*$").expect("regex is valid");
    let body_marker = Regex::new(r"(?im)^body\s*:\s*$").expect("regex is valid");

    let blocks: Vec<&str> = separator
        .split(text)
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .collect();

    let records: Vec<InboundRecord> = blocks
        .iter()
        .enumerate()
        .map(|(i, block)| {
            let timestamp = header_value(block, "timestamp").and_then(|v| parse_timestamp(&v));
            let sender = header_value(block, "sender").filter(|v| !v.is_empty());
            let subject = header_value(block, "subject").unwrap_or_default();

            let body = match body_marker.find(block) {
                Some(m) => block[m.end()..].trim().to_string(),
                None => block.to_string(),
            };

            let subject = if subject.is_empty() {
                synthesize_subject(&body)
            } else {
                subject
            };

            InboundRecord {
                id: format!("text-{}", i + 1),
                timestamp,
                sender,
                subject,
                body,
                source: RecordSource::Text,
            }
        })
        .filter(InboundRecord::has_content)
        .collect();

    debug!(
        "normalize_text_blocks: {} usable records from {} blocks",
        records.len(),
        blocks.len()
    );
    records
}

/// Find the first `name: value` line in `block` (case-insensitive) and
/// return the trimmed value after the first colon.
fn header_value(block: &str, name: &str) -> Option<String> {
    let prefix = format!("{}:", name);
    block.lines().find_map(|line| {
        let lower = line.to_lowercase();
        lower
            .starts_with(&prefix)
            .then(|| line[prefix.len()..].trim().to_string())
    })
}

/// Derive a subject from the first non-blank body line.
fn synthesize_subject(body: &str) -> String {
    let first_line = body
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or_default();

    if first_line.chars().count() > 80 {
        let truncated: String = first_line.chars().take(80).collect();
        format!("{}...", truncated)
    } else {
        first_line.to_string()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
