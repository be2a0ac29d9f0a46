//! Path-aware access into JSON values
//!
//! Implements `get`/`set`/`unset` over `serde_json::Value` using dotted
//! paths with optional bracket indices: `a.b[0].c` addresses the same leaf
//! as `a.b.0.c`. `set` materializes missing intermediate containers, picking
//! an array when the next segment is a decimal index and an object
//! otherwise.

use serde_json::{Map, Value};

/// Split a dotted/bracketed path into segments.
///
/// `a.b[0].c` -> `["a", "b", "0", "c"]`
fn split_path(path: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    for ch in path.chars() {
        match ch {
            '.' | '[' | ']' => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(ch),
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

/// A segment addresses an array slot when it is all decimal digits.
fn array_index(segment: &str) -> Option<usize> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}

/// Read the value at `path`, or `None` when any segment is missing.
pub fn get<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = root;
    for segment in split_path(path) {
        current = match current {
            Value::Object(map) => map.get(&segment)?,
            Value::Array(items) => items.get(array_index(&segment)?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Write `new_value` at `path`, creating intermediate containers as needed.
///
/// Non-container values along the way are replaced; an empty path replaces
/// the root outright.
pub fn set(root: &mut Value, path: &str, new_value: Value) {
    let segments = split_path(path);
    if segments.is_empty() {
        *root = new_value;
        return;
    }
    set_segments(root, &segments, new_value);
}

fn set_segments(current: &mut Value, segments: &[String], new_value: Value) {
    let segment = &segments[0];
    let index = array_index(segment);

    // Normalize this level to a container the segment can address. A decimal
    // segment still writes a string key into an existing object.
    let container_fits = match (index, &*current) {
        (Some(_), Value::Array(_)) => true,
        (_, Value::Object(_)) => true,
        _ => false,
    };
    if !container_fits {
        *current = match index {
            Some(_) => Value::Array(Vec::new()),
            None => Value::Object(Map::new()),
        };
    }

    if let Value::Object(map) = current {
        if segments.len() == 1 {
            map.insert(segment.clone(), new_value);
        } else {
            let child = map.entry(segment.clone()).or_insert(Value::Null);
            set_segments(child, &segments[1..], new_value);
        }
        return;
    }
    if let Value::Array(items) = current {
        if let Some(i) = index {
            if items.len() <= i {
                items.resize(i + 1, Value::Null);
            }
            if segments.len() == 1 {
                items[i] = new_value;
            } else {
                set_segments(&mut items[i], &segments[1..], new_value);
            }
        }
    }
}

/// Remove the value at `path`.
///
/// Returns `true` when a value was present and removed. Array slots are
/// nulled in place so sibling indices keep their positions.
pub fn unset(root: &mut Value, path: &str) -> bool {
    let segments = split_path(path);
    let Some((last, parents)) = segments.split_last() else {
        return false;
    };

    let mut current = root;
    for segment in parents {
        let next = match current {
            Value::Object(map) => map.get_mut(segment),
            Value::Array(items) => array_index(segment).and_then(|i| items.get_mut(i)),
            _ => None,
        };
        match next {
            Some(value) => current = value,
            None => return false,
        }
    }

    match current {
        Value::Object(map) => map.remove(last).is_some(),
        Value::Array(items) => match array_index(last) {
            Some(i) if i < items.len() && !items[i].is_null() => {
                items[i] = Value::Null;
                true
            }
            _ => false,
        },
        _ => false,
    }
}
