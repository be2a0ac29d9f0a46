//! Deep merge over JSON values
//!
//! Merge rule: objects union recursively key by key; any non-object source
//! value (arrays included) overwrites the destination entirely; absent
//! sources are no-ops. Later sources therefore win on conflicting leaves.

use serde_json::{Map, Value};

/// Merge `source` into `dest`.
pub fn deep_merge(dest: &mut Value, source: &Value) {
    match (dest, source) {
        (Value::Object(dest_map), Value::Object(source_map)) => {
            merge_entries(dest_map, source_map);
        }
        (dest, source) => *dest = source.clone(),
    }
}

/// Merge the entries of `source` into `dest`.
pub fn merge_entries(dest: &mut Map<String, Value>, source: &Map<String, Value>) {
    for (key, value) in source {
        match dest.get_mut(key) {
            Some(existing) if existing.is_object() && value.is_object() => {
                deep_merge(existing, value);
            }
            _ => {
                dest.insert(key.clone(), value.clone());
            }
        }
    }
}

/// Merge an optional source into `dest` when it is an object.
///
/// Missing sources and non-object sources are no-ops, so absent database or
/// persisted-store sections can be merged unconditionally.
pub fn merge_object(dest: &mut Map<String, Value>, source: Option<&Value>) {
    if let Some(Value::Object(source_map)) = source {
        merge_entries(dest, source_map);
    }
}
