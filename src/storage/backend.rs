//! Storage backend capability set.

/// The capability set every host backend provides.
///
/// One implementation exists per host family; the adapter selects a backend
/// once at construction rather than branching on host identity per call.
/// Operations a host cannot perform report `false` (or `None` for reads)
/// instead of raising.
pub trait StorageBackend: Send + Sync {
    /// Backend label used in diagnostics.
    fn name(&self) -> &'static str;

    /// Read the raw string stored under `key`.
    fn read(&self, key: &str) -> Option<String>;

    /// Write `value` under `key`.
    fn write(&self, key: &str, value: &str) -> bool;

    /// Remove `key`; `false` when the host has no removal primitive.
    fn erase(&self, key: &str) -> bool;

    /// Drop every key; `false` when the host has no clear primitive.
    fn clear(&self) -> bool;
}
