//! Runtime value helpers
//!
//! Field values arrive as untyped JSON. Everything that inspects a value
//! (required checks, length bounds, condition operators) goes through the
//! text projection defined here so they all agree on what "empty" means.

use serde_json::Value;
use std::borrow::Cow;

/// Text form of a value, or `None` when the value is absent.
///
/// Arrays join their elements with `,`; objects render as compact JSON.
pub fn as_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Bool(b) => Some(Cow::Owned(b.to_string())),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Array(items) => Some(Cow::Owned(
            items
                .iter()
                .filter_map(as_text)
                .collect::<Vec<_>>()
                .join(","),
        )),
        Value::Object(_) => Some(Cow::Owned(value.to_string())),
    }
}

/// Absent, or empty once trimmed
pub fn is_blank(value: &Value) -> bool {
    as_text(value).map_or(true, |text| text.trim().is_empty())
}

/// Numeric reading of a value, parsing strings when needed
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Loose equality: numbers compare numerically, everything else by text
pub fn loosely_equal(actual: &Value, expected: &Value) -> bool {
    if let (Some(a), Some(b)) = (as_number(actual), as_number(expected)) {
        return a == b;
    }
    match (as_text(actual), as_text(expected)) {
        (Some(a), Some(b)) => a == b,
        (None, None) => true,
        _ => false,
    }
}
