use crate::detection::datetime::parse_timestamp;
use crate::detection::quote::{unescape_quotes, unwrap_quoted};
use crate::error::Result;
use crate::types::FieldValue;
use once_cell::sync::Lazy;
use regex::Regex;

/// Decimal literal, optionally signed, with optional exponent, or a signed infinity
static NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?|[+-]?Infinity)$")
        .expect("number regex is valid")
});

/// Resolve a raw field from a body row into a typed value.
///
/// Type tests run on the trimmed text. First match wins: empty, quoted,
/// timestamp, boolean, number. Anything else is a string built from the
/// untrimmed field so inner and outer whitespace survive.
pub fn coerce_value(raw: &str, row: usize) -> Result<FieldValue> {
    let value = raw.trim();

    if value.is_empty() {
        return Ok(FieldValue::Null);
    }

    if let Some(unquoted) = unwrap_quoted(value, row)? {
        return Ok(FieldValue::String(unquoted));
    }

    if let Some(ts) = parse_timestamp(value) {
        return Ok(FieldValue::Timestamp(ts));
    }

    if let Some(b) = try_parse_boolean(value) {
        return Ok(FieldValue::Boolean(b));
    }

    if let Some(n) = try_parse_number(value) {
        return Ok(FieldValue::Number(n));
    }

    Ok(FieldValue::String(unescape_quotes(raw)))
}

/// Case-insensitive `true` / `false`
fn try_parse_boolean(value: &str) -> Option<bool> {
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn try_parse_number(value: &str) -> Option<f64> {
    if !NUMBER.is_match(value) {
        return None;
    }
    match value {
        "Infinity" | "+Infinity" => Some(f64::INFINITY),
        "-Infinity" => Some(f64::NEG_INFINITY),
        _ => value.parse::<f64>().ok(),
    }
}
