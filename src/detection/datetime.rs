use crate::types::{DATE_PATTERNS, DATETIME_PATTERNS, OFFSET_DATETIME_PATTERNS};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

/// Date separator characters
const DATE_SEPS: &[char] = &['/', '-', '.'];

/// Time separator characters
const TIME_SEPS: &[char] = &[':'];

/// A bare integer or decimal
static NUMERIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)$").expect("numeric regex is valid")
});

/// Check if a string could potentially be a datetime value
pub fn could_be_datetime(value: &str) -> bool {
    if value.is_empty() || NUMERIC.is_match(value) {
        return false;
    }

    let has_date_sep = value.chars().any(|c| DATE_SEPS.contains(&c));
    let has_time_sep = value.chars().any(|c| TIME_SEPS.contains(&c));
    let has_digits = value.chars().any(|c| c.is_ascii_digit());

    has_digits && (has_date_sep || has_time_sep)
}

/// Parse a trimmed value as a timestamp. Values without an offset are UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if !could_be_datetime(value) {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Some(dt.with_timezone(&Utc));
    }

    for pattern in OFFSET_DATETIME_PATTERNS {
        if let Ok(dt) = DateTime::parse_from_str(value, pattern) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    for pattern in DATETIME_PATTERNS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, pattern) {
            return Some(naive.and_utc());
        }
    }

    DATE_PATTERNS.iter().find_map(|pattern| {
        NaiveDate::parse_from_str(value, pattern)
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    })
}
