//! In-memory backend for embedders without a host binding, and for tests.

use crate::storage::backend::StorageBackend;
use parking_lot::Mutex;
use std::collections::HashMap;

/// Fully capable in-memory backend.
#[derive(Default)]
pub struct MemoryBackend {
    data: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn read(&self, key: &str) -> Option<String> {
        self.data.lock().get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) -> bool {
        self.data.lock().insert(key.to_string(), value.to_string());
        true
    }

    fn erase(&self, key: &str) -> bool {
        self.data.lock().remove(key).is_some()
    }

    fn clear(&self) -> bool {
        self.data.lock().clear();
        true
    }
}
