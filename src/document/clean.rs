//! Cleanup of document JSON before it is loaded.
//!
//! Catalog cells are sparse: most rows leave some columns empty or `NR`.
//! Documents are swept so that only informative values remain.

use serde_json::{Map, Number, Value};

use crate::catalog::NOT_REPORTED;

/// Keys whose string values are never converted to numbers.
pub const NUMERIC_SKIPPED_KEYS: [&str; 2] = ["_id", "chrom"];

/// Apply the full cleanup pass to a document.
///
/// 1. numeric-looking strings become JSON numbers (except under skipped keys)
/// 2. nulls, empty strings, `NR` and empty containers are removed
/// 3. single-element arrays collapse to their element
///
/// Returns `Value::Null` when nothing informative is left.
pub fn clean_document(value: Value) -> Value {
    let value = convert_numbers(value, &NUMERIC_SKIPPED_KEYS);
    sweep(value).map(unlist).unwrap_or(Value::Null)
}

fn is_swept(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty() || s == NOT_REPORTED,
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// Recursively drop null, empty, and `NR` values.
pub fn sweep(value: Value) -> Option<Value> {
    let value = match value {
        Value::Array(items) => Value::Array(items.into_iter().filter_map(sweep).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter_map(|(k, v)| sweep(v).map(|v| (k, v)))
                .collect::<Map<String, Value>>(),
        ),
        other => other,
    };
    (!is_swept(&value)).then_some(value)
}

/// Recursively replace single-element arrays by their only element.
pub fn unlist(value: Value) -> Value {
    match value {
        Value::Array(mut items) if items.len() == 1 => unlist(items.remove(0)),
        Value::Array(items) => Value::Array(items.into_iter().map(unlist).collect()),
        Value::Object(map) => Value::Object(map.into_iter().map(|(k, v)| (k, unlist(v))).collect()),
        other => other,
    }
}

fn looks_numeric(s: &str) -> bool {
    s.bytes().any(|b| b.is_ascii_digit())
        && s
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+' | b'e' | b'E'))
}

fn to_number(s: &str) -> Option<Number> {
    if !looks_numeric(s) {
        return None;
    }
    if let Ok(i) = s.parse::<i64>() {
        return Some(Number::from(i));
    }
    s.parse::<f64>().ok().and_then(Number::from_f64)
}

/// Recursively convert numeric-looking strings into JSON numbers.
///
/// Values stored directly under any of `skipped_keys` are left untouched.
pub fn convert_numbers(value: Value, skipped_keys: &[&str]) -> Value {
    match value {
        Value::String(s) => match to_number(&s) {
            Some(n) => Value::Number(n),
            None => Value::String(s),
        },
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|v| convert_numbers(v, skipped_keys))
                .collect(),
        ),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| {
                    if skipped_keys.contains(&k.as_str()) {
                        (k, v)
                    } else {
                        let v = convert_numbers(v, skipped_keys);
                        (k, v)
                    }
                })
                .collect(),
        ),
        other => other,
    }
}
