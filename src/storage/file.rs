//! Standalone-runtime backend: one JSON data file, rewritten whole per call.

use crate::storage::backend::StorageBackend;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Default data file name for the standalone runtime.
pub const DEFAULT_DATA_FILE: &str = "box.dat";

/// File-backed storage for the standalone runtime.
///
/// Every operation loads the full data file, mutates the mapping in memory
/// and persists the whole file again. There is no partial write and no
/// cross-call cache; concurrent writers are last-writer-wins and must be
/// serialized externally. The data file name and process root are explicit
/// constructor inputs.
pub struct FileBackend {
    data_file: PathBuf,
    process_root: PathBuf,
}

impl FileBackend {
    pub fn new<F: Into<PathBuf>, R: Into<PathBuf>>(data_file: F, process_root: R) -> Self {
        Self {
            data_file: data_file.into(),
            process_root: process_root.into(),
        }
    }

    /// Candidate data-file location: first relative to the current working
    /// directory, then relative to the process root, preferring whichever
    /// exists. Writes with no existing file create the working-directory
    /// candidate.
    fn resolve_path(&self) -> PathBuf {
        let cwd_candidate = std::env::current_dir()
            .map(|dir| dir.join(&self.data_file))
            .unwrap_or_else(|_| self.data_file.clone());
        if cwd_candidate.exists() {
            return cwd_candidate;
        }
        let root_candidate = self.process_root.join(&self.data_file);
        if root_candidate.exists() {
            return root_candidate;
        }
        cwd_candidate
    }

    /// Load the mapping; missing file or malformed JSON degrades to empty.
    fn load(&self) -> Map<String, Value> {
        load_mapping(&self.resolve_path())
    }

    fn persist(&self, data: &Map<String, Value>) -> bool {
        let path = self.resolve_path();
        let encoded = Value::Object(data.clone()).to_string();
        match fs::write(&path, encoded) {
            Ok(()) => true,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to persist data file");
                false
            }
        }
    }
}

fn load_mapping(path: &Path) -> Map<String, Value> {
    match fs::read_to_string(path) {
        Ok(text) => serde_json::from_str(&text).unwrap_or_default(),
        Err(_) => Map::new(),
    }
}

impl StorageBackend for FileBackend {
    fn name(&self) -> &'static str {
        "file"
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.load().remove(key) {
            Some(Value::String(text)) => Some(text),
            // Values written by other tooling may be stored as raw JSON.
            Some(other) => Some(other.to_string()),
            None => None,
        }
    }

    fn write(&self, key: &str, value: &str) -> bool {
        let mut data = self.load();
        data.insert(key.to_string(), Value::String(value.to_string()));
        self.persist(&data)
    }

    fn erase(&self, key: &str) -> bool {
        let mut data = self.load();
        data.remove(key);
        self.persist(&data)
    }

    fn clear(&self) -> bool {
        self.persist(&Map::new())
    }
}
