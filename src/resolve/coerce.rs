//! Settings leaf coercion.
//!
//! Host argument maps and preference stores deliver everything as strings;
//! after the merge the settings tree is walked depth-first and string
//! leaves are converted back: `"true"`/`"false"` to booleans,
//! comma-separated strings to arrays, digit-only strings to integers.

use serde_json::{Map, Value};

/// Convert a digit-only string into an integer.
///
/// The rule is `^\d+$`: ASCII digits only, no sign, no decimals. Leading
/// zeros still match, so `"01"` converts to `1`. Anything else (including
/// digit strings too large for an integer) passes through unchanged.
pub fn string_to_number(text: &str) -> Value {
    if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(number) = text.parse::<u64>() {
            return Value::from(number);
        }
    }
    Value::String(text.to_string())
}

/// Split a comma-separated string into segments.
///
/// Arrays pass through untouched; absent or non-string values yield an
/// empty list. Segments are not number-converted here.
pub fn string_to_array(value: Option<&Value>) -> Vec<Value> {
    match value {
        Some(Value::Array(items)) => items.clone(),
        Some(Value::String(text)) => text
            .split(',')
            .map(|segment| Value::String(segment.to_string()))
            .collect(),
        _ => Vec::new(),
    }
}

/// Walk a settings tree depth-first and coerce its string leaves.
pub fn coerce_settings(settings: &mut Map<String, Value>) {
    for value in settings.values_mut() {
        coerce_value(value);
    }
}

fn coerce_value(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for nested in map.values_mut() {
                coerce_value(nested);
            }
        }
        Value::Array(items) => {
            for item in items.iter_mut() {
                coerce_value(item);
            }
        }
        Value::String(text) => {
            *value = coerce_leaf(text);
        }
        _ => {}
    }
}

fn coerce_leaf(text: &str) -> Value {
    match text {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ if text.contains(',') => {
            Value::Array(text.split(',').map(string_to_number).collect())
        }
        _ => string_to_number(text),
    }
}
