//! Pre-parse validation
//!
//! Rejects a wrong or malformed file before any trial extraction runs:
//! declared participant identity, the fixed period-duration sequence
//! (where the protocol has one), and the baseline timestamp every onset
//! is normalized against.

use crate::error::{ParseError, ParseResult};
use crate::lines::LogLine;

const SUBJECT_LABEL: &str = "Subject:";
const DURATION_LABEL: &str = "PeriodDuration:";
// PeriodList attribute lines also mention periods; never read them as
// durations.
const DURATION_EXCLUDE: &[&str] = &["PeriodList"];

/// Normalize a caller-supplied participant id for comparison against
/// the in-file `Subject:` value: drop the `I`-prefix naming convention,
/// then leading zeros. `I00020`, `020` and `20` all normalize to `20`.
pub fn normalize_participant(id: &str) -> String {
    let id = id.trim();
    let id = id.strip_prefix('I').unwrap_or(id);
    id.trim_start_matches('0').to_string()
}

/// Check the declared `Subject:` against the expected (normalized) id.
pub fn check_participant(lines: &[LogLine], expected: &str) -> ParseResult<()> {
    let found = lines
        .iter()
        .find(|line| line.matches(SUBJECT_LABEL, &[]))
        .and_then(|line| line.value())
        .map(|value| value.trim_start_matches('0').to_string());

    match found {
        Some(found) if found == expected => Ok(()),
        Some(found) => Err(ParseError::ParticipantMismatch {
            found,
            expected: expected.to_string(),
        }),
        None => Err(ParseError::ParticipantMismatch {
            found: "<missing>".to_string(),
            expected: expected.to_string(),
        }),
    }
}

/// Collect every period-duration line and compare the ordered sequence
/// against the protocol's fixed design (exact length, exact order).
pub fn check_durations(lines: &[LogLine], expected: &[i64]) -> ParseResult<()> {
    let mut found = Vec::new();
    for line in lines {
        if !line.matches(DURATION_LABEL, DURATION_EXCLUDE) {
            continue;
        }
        let raw = line.value().unwrap_or("");
        let duration = raw.parse::<i64>().map_err(|_| {
            ParseError::token(0, line.number, "PeriodDuration", raw)
        })?;
        found.push(duration);
    }

    if found != expected {
        return Err(ParseError::UnexpectedDurations {
            expected: expected.to_vec(),
            found,
        });
    }
    Ok(())
}

/// Locate the single baseline-timestamp line and parse its value as
/// milliseconds. The baseline is resolved once per run; every onset in
/// the file is normalized against it.
pub fn find_baseline(lines: &[LogLine], label: &str) -> ParseResult<f64> {
    let line = lines
        .iter()
        .find(|line| line.matches(label, &[]))
        .ok_or_else(|| ParseError::BaselineNotFound {
            label: label.to_string(),
        })?;

    let raw = line.value().unwrap_or("");
    raw.parse::<f64>()
        .map_err(|_| ParseError::token(0, line.number, label, raw))
}
