//! Proxy-app backend over an injected persistent-store binding.

use crate::storage::backend::StorageBackend;

/// The proxy-app host's persistent-store binding.
///
/// Embedders implement this over the runtime's native read/write primitive.
/// Writing `None` erases the key on hosts whose store treats a null write as
/// removal.
pub trait PersistentStoreApi: Send + Sync {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, value: Option<&str>, key: &str) -> bool;
}

/// Proxy-app host flavors sharing the persistent-store binding.
///
/// They differ only in removal support: Surge erases through a null write,
/// the others have no removal primitive at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProxyHost {
    Surge,
    Loon,
    Stash,
    Egern,
    Shadowrocket,
}

impl ProxyHost {
    fn supports_erase(self) -> bool {
        matches!(self, ProxyHost::Surge)
    }
}

/// Backend for proxy-app hosts.
pub struct ProxyStoreBackend {
    host: ProxyHost,
    api: Box<dyn PersistentStoreApi>,
}

impl ProxyStoreBackend {
    pub fn new(host: ProxyHost, api: Box<dyn PersistentStoreApi>) -> Self {
        Self { host, api }
    }
}

impl StorageBackend for ProxyStoreBackend {
    fn name(&self) -> &'static str {
        "persistent-store"
    }

    fn read(&self, key: &str) -> Option<String> {
        self.api.read(key)
    }

    fn write(&self, key: &str, value: &str) -> bool {
        self.api.write(Some(value), key)
    }

    fn erase(&self, key: &str) -> bool {
        if self.host.supports_erase() {
            self.api.write(None, key)
        } else {
            false
        }
    }

    fn clear(&self) -> bool {
        false
    }
}
