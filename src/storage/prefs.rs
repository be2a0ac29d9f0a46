//! Alternate-proxy backend over an injected preference-store binding.

use crate::storage::backend::StorageBackend;

/// The alternate proxy host's preference-store binding.
///
/// Unlike the persistent-store binding this one carries native removal and
/// clear primitives.
pub trait PreferencesApi: Send + Sync {
    fn value_for_key(&self, key: &str) -> Option<String>;
    fn set_value_for_key(&self, value: &str, key: &str) -> bool;
    fn remove_value_for_key(&self, key: &str) -> bool;
    fn remove_all_values(&self) -> bool;
}

/// Backend for the alternate proxy host.
pub struct PreferencesBackend {
    api: Box<dyn PreferencesApi>,
}

impl PreferencesBackend {
    pub fn new(api: Box<dyn PreferencesApi>) -> Self {
        Self { api }
    }
}

impl StorageBackend for PreferencesBackend {
    fn name(&self) -> &'static str {
        "preferences"
    }

    fn read(&self, key: &str) -> Option<String> {
        self.api.value_for_key(key)
    }

    fn write(&self, key: &str, value: &str) -> bool {
        self.api.set_value_for_key(value, key)
    }

    fn erase(&self, key: &str) -> bool {
        self.api.remove_value_for_key(key)
    }

    fn clear(&self) -> bool {
        self.api.remove_all_values()
    }
}
