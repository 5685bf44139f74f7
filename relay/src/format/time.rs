//! Timestamp normalization for the `time`/`timestamp` payload field.
//!
//! Alert sources disagree on what a timestamp is: epoch seconds, epoch
//! milliseconds, or a preformatted string. Numbers are auto-detected and
//! rendered as UTC; strings are displayed verbatim (escaped by the caller).

use chrono::DateTime;
use serde_json::Value;

/// Epoch values above this are treated as milliseconds.
const EPOCH_MS_THRESHOLD: f64 = 1e12;

/// Outcome of normalizing the time field.
///
/// The three variants map to three distinct display behaviors:
/// no value at all, a successfully converted epoch, and a value that was
/// present but is shown in its raw form.
#[derive(Debug, Clone, PartialEq)]
pub enum TimeDisplay {
    /// Field absent, null, or of a type we do not interpret.
    Absent,
    /// Numeric epoch converted to `YYYY-MM-DD HH:MM:SS UTC`.
    Parsed(String),
    /// String value, or a number whose conversion failed; display raw.
    Raw(String),
}

/// Normalize the raw time value from a payload.
pub fn normalize_time(raw: Option<&Value>) -> TimeDisplay {
    let raw = match raw {
        Some(v) if !v.is_null() => v,
        _ => return TimeDisplay::Absent,
    };

    match raw {
        Value::Number(n) => match n.as_f64().and_then(epoch_to_utc) {
            Some(formatted) => TimeDisplay::Parsed(formatted),
            None => TimeDisplay::Raw(n.to_string()),
        },
        Value::String(s) => TimeDisplay::Raw(s.clone()),
        _ => TimeDisplay::Absent,
    }
}

/// Convert an epoch value (seconds or milliseconds) to a UTC display string.
///
/// Returns `None` when the value is non-finite or outside the representable
/// datetime range.
fn epoch_to_utc(epoch: f64) -> Option<String> {
    let seconds = if epoch > EPOCH_MS_THRESHOLD {
        epoch / 1000.0
    } else {
        epoch
    };

    if !seconds.is_finite() {
        return None;
    }

    let secs = seconds.floor();
    let nanos = ((seconds - secs) * 1e9) as u32;
    let dt = DateTime::from_timestamp(secs as i64, nanos)?;

    Some(dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
}
