//! Response normalizer: reformats dates and decimals for display.
//!
//! The walk is structure-preserving. Objects keep their keys and order,
//! arrays keep their order, and only leaves change:
//! - ISO-8601 UTC timestamps become `MM/DD/YYYY`
//! - plain decimal strings and non-integer numbers become two-decimal strings
//!
//! Output is a fixed point: normalizing it again changes nothing.

use std::sync::LazyLock;

use chrono::DateTime;
use regex::Regex;
use serde_json::{Map, Number, Value};

use crate::constants::DATE_FORMAT;

static ISO_TIMESTAMP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(?:\.\d+)?Z$").unwrap()
});

static DECIMAL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^-?\d+\.\d+$").unwrap());

/// Normalize every leaf of `value`.
pub fn normalize(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), normalize(v)))
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(normalize).collect()),
        Value::String(s) => Value::String(normalize_str(s).unwrap_or_else(|| s.clone())),
        Value::Number(n) => normalize_number(n),
        Value::Bool(_) | Value::Null => value.clone(),
    }
}

/// Reformat a string leaf, or `None` to keep it as is.
fn normalize_str(s: &str) -> Option<String> {
    if ISO_TIMESTAMP_RE.is_match(s) {
        // Shape matched but calendar invalid (e.g. month 13): leave it.
        let parsed = DateTime::parse_from_rfc3339(s).ok()?;
        return Some(parsed.naive_utc().date().format(DATE_FORMAT).to_string());
    }
    if DECIMAL_RE.is_match(s) {
        let parsed: f64 = s.parse().ok()?;
        return Some(format_decimal(parsed));
    }
    None
}

fn normalize_number(n: &Number) -> Value {
    match n.as_f64() {
        Some(f) if !n.is_i64() && !n.is_u64() && f.fract() != 0.0 => {
            Value::String(format_decimal(f))
        }
        _ => Value::Number(n.clone()),
    }
}

/// Two-decimal string, rounding ties away from zero.
///
/// `{:.2}` rounds an exact tie to even (`0.125` gives `0.12`). An f64 sits
/// exactly halfway between two cents only when it is an odd number of
/// eighths, so those values are pushed up to the next cent by hand.
fn format_decimal(f: f64) -> String {
    let eighths = f.abs() * 8.0;
    if eighths.fract() == 0.0 && eighths % 2.0 == 1.0 {
        let cents = (f.abs() * 100.0).ceil();
        let sign = if f.is_sign_negative() { "-" } else { "" };
        return format!("{sign}{:.2}", cents / 100.0);
    }
    format!("{f:.2}")
}
