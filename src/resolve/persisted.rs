//! Persisted-store normalization.
//!
//! Stored `Settings`/`Caches` sections arrive in one of two wire shapes:
//! JSON-encoded text or an already-decoded object. Both are accepted on
//! read; normalization decodes text sections in place with an explicit
//! empty-object fallback on malformed JSON.

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

/// A stored section as it appears on the wire.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StoredSection {
    Raw(String),
    Decoded(Map<String, Value>),
}

impl StoredSection {
    /// Normalize to an object. Malformed raw text decodes to empty.
    pub fn into_object(self) -> Map<String, Value> {
        match self {
            StoredSection::Raw(text) => decode_object(&text).unwrap_or_default(),
            StoredSection::Decoded(map) => map,
        }
    }
}

/// Parse JSON text into an object.
///
/// The fallback-to-empty decision on failure belongs to the call site, not
/// here.
pub fn decode_object(text: &str) -> Result<Map<String, Value>, serde_json::Error> {
    serde_json::from_str(text)
}

/// Decode string-typed `Settings`/`Caches` sections in place for each
/// listed profile. Sections that are neither text nor an object normalize
/// to empty.
pub fn normalize_sections(store: &mut Map<String, Value>, names: &[&str]) {
    for name in names {
        let Some(Value::Object(profile)) = store.get_mut(*name) else {
            continue;
        };
        for section in ["Settings", "Caches"] {
            let Some(value) = profile.remove(section) else {
                continue;
            };
            let normalized = match serde_json::from_value::<StoredSection>(value) {
                Ok(section_value) => section_value.into_object(),
                Err(_) => {
                    debug!(profile = *name, section, "unusable stored section, using empty");
                    Map::new()
                }
            };
            profile.insert(section.to_string(), Value::Object(normalized));
        }
    }
}
