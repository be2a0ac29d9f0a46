//! Storage Adapter
//!
//! Normalizes `get/set/remove/clear` across host storage backends and
//! resolves `@key.path` deep addressing into JSON values stored under a
//! single top-level key. Reads attempt a best-effort JSON decode and fall
//! back to the raw string; writes serialize objects as JSON and scalars via
//! string coercion.

use crate::error::StorageError;
use crate::value_path;
use serde_json::{Map, Value};

mod backend;
mod file;
mod memory;
mod path_key;
mod prefs;
mod proxy;

pub use backend::StorageBackend;
pub use file::{FileBackend, DEFAULT_DATA_FILE};
pub use memory::MemoryBackend;
pub use path_key::PathKey;
pub use prefs::{PreferencesApi, PreferencesBackend};
pub use proxy::{PersistentStoreApi, ProxyHost, ProxyStoreBackend};

/// Uniform storage interface over one host backend.
///
/// The backend is selected once at construction; the adapter owns all of
/// its state explicitly and performs no per-call host detection.
pub struct Storage {
    backend: Box<dyn StorageBackend>,
}

impl Storage {
    pub fn new(backend: Box<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Adapter over a fresh in-memory backend.
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryBackend::new()))
    }

    /// Backend label used in diagnostics.
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Read the value stored under `key_name`, or `default_value` when the
    /// key (or the addressed path) holds nothing.
    ///
    /// `@key.path` names read the object stored under `key` and extract the
    /// value at `path`; a string leaf gets a second best-effort decode since
    /// it may itself be encoded JSON.
    pub fn get_item(&self, key_name: &str, default_value: Value) -> Result<Value, StorageError> {
        if PathKey::is_path_key(key_name) {
            let parsed = PathKey::parse(key_name)?;
            let mut container = self.get_item(parsed.key, Value::Object(Map::new()))?;
            if !container.is_object() {
                container = Value::Object(Map::new());
            }
            let leaf = match parsed.path {
                Some(path) => value_path::get(&container, path).cloned(),
                None => Some(container),
            };
            let leaf = leaf.map(decode_leaf);
            return Ok(match leaf {
                Some(Value::Null) | None => default_value,
                Some(value) => value,
            });
        }

        match self.backend.read(key_name) {
            Some(raw) => {
                let parsed = decode_raw(raw);
                Ok(if parsed.is_null() { default_value } else { parsed })
            }
            None => Ok(default_value),
        }
    }

    /// Write `value` under `key_name`.
    ///
    /// `@key.path` names mutate the object stored under `key` at `path` and
    /// persist it back through a recursive write.
    pub fn set_item(&self, key_name: &str, value: &Value) -> Result<bool, StorageError> {
        if PathKey::is_path_key(key_name) {
            let parsed = PathKey::parse(key_name)?;
            let mut container = self.get_item(parsed.key, Value::Object(Map::new()))?;
            if !container.is_object() {
                container = Value::Object(Map::new());
            }
            match parsed.path {
                Some(path) => value_path::set(&mut container, path, value.clone()),
                None => container = value.clone(),
            }
            return self.set_item(parsed.key, &container);
        }

        Ok(self.backend.write(key_name, &encode_raw(value)))
    }

    /// Remove `key_name`.
    ///
    /// `@key.path` names unset the path inside the stored object and persist
    /// the mutated object; plain names use the backend's removal primitive
    /// and report `false` on hosts that lack one.
    pub fn remove_item(&self, key_name: &str) -> Result<bool, StorageError> {
        if PathKey::is_path_key(key_name) {
            let parsed = PathKey::parse(key_name)?;
            let mut container = self.get_item(parsed.key, Value::Object(Map::new()))?;
            if !container.is_object() {
                container = Value::Object(Map::new());
            }
            match parsed.path {
                Some(path) => {
                    value_path::unset(&mut container, path);
                }
                None => container = Value::Object(Map::new()),
            }
            return self.set_item(parsed.key, &container);
        }

        Ok(self.backend.erase(key_name))
    }

    /// Drop every key; `false` on hosts without a clear primitive.
    pub fn clear(&self) -> bool {
        self.backend.clear()
    }
}

/// Best-effort decode of a raw stored string; parse failure keeps the raw
/// string unchanged.
fn decode_raw(raw: String) -> Value {
    serde_json::from_str(&raw).unwrap_or(Value::String(raw))
}

/// A leaf extracted from a stored object may itself be encoded JSON.
fn decode_leaf(value: Value) -> Value {
    match value {
        Value::String(text) => serde_json::from_str(&text).unwrap_or(Value::String(text)),
        other => other,
    }
}

/// Objects and arrays serialize as JSON; scalars via string coercion.
fn encode_raw(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
