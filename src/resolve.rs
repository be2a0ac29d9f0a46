//! Configuration Resolution
//!
//! Loads the persisted store for a key, merges it against the compiled-in
//! database and the runtime argument map across an ordered list of profile
//! names, then coerces string leaves of the merged settings tree.
//!
//! `Configs` and `Caches` always merge database-then-store per profile;
//! only the `Settings` order is policy-controlled (see [`MergePolicy`]).

use crate::error::StorageError;
use crate::logging;
use crate::merge::{merge_entries, merge_object};
use crate::storage::Storage;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

mod coerce;
mod persisted;
mod policy;

pub use coerce::{string_to_array, string_to_number};
pub use persisted::{decode_object, StoredSection};
pub use policy::MergePolicy;

const SETTINGS: &str = "Settings";
const CONFIGS: &str = "Configs";
const CACHES: &str = "Caches";
const LOG_LEVEL: &str = "LogLevel";
const DEFAULT_PROFILE: &str = "Default";
const POLICY_TOKEN: &str = "Storage";

/// One profile name, a list, or arbitrarily nested lists.
///
/// Flattening preserves order, and order matters: later names override
/// earlier ones on conflicting leaves.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileNames {
    One(String),
    Many(Vec<ProfileNames>),
}

impl ProfileNames {
    /// Flatten into merge order.
    pub fn flatten(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect(&mut out);
        out
    }

    fn collect<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            ProfileNames::One(name) => out.push(name.as_str()),
            ProfileNames::Many(items) => {
                for item in items {
                    item.collect(out);
                }
            }
        }
    }
}

impl From<&str> for ProfileNames {
    fn from(name: &str) -> Self {
        ProfileNames::One(name.to_string())
    }
}

impl From<String> for ProfileNames {
    fn from(name: String) -> Self {
        ProfileNames::One(name)
    }
}

impl From<Vec<&str>> for ProfileNames {
    fn from(names: Vec<&str>) -> Self {
        ProfileNames::Many(names.into_iter().map(ProfileNames::from).collect())
    }
}

impl From<Vec<String>> for ProfileNames {
    fn from(names: Vec<String>) -> Self {
        ProfileNames::Many(names.into_iter().map(ProfileNames::One).collect())
    }
}

impl From<Vec<ProfileNames>> for ProfileNames {
    fn from(names: Vec<ProfileNames>) -> Self {
        ProfileNames::Many(names)
    }
}

/// Compiled-in default database: profile name to `{Settings, Configs}`,
/// with an optional `Default` profile seeding every resolution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Database(pub Map<String, Value>);

impl Database {
    fn section(&self, name: &str, section: &str) -> Option<&Value> {
        self.0.get(name)?.get(section)
    }

    fn seed(&self, section: &str) -> Map<String, Value> {
        match self.section(DEFAULT_PROFILE, section) {
            Some(Value::Object(map)) => map.clone(),
            _ => Map::new(),
        }
    }
}

impl From<Value> for Database {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Database(map),
            _ => Database::default(),
        }
    }
}

/// Resolved profile: three independently merged trees.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageProfile {
    #[serde(rename = "Settings", default)]
    pub settings: Map<String, Value>,

    #[serde(rename = "Configs", default)]
    pub configs: Map<String, Value>,

    #[serde(rename = "Caches", default)]
    pub caches: Map<String, Value>,
}

/// Multi-source configuration resolver.
///
/// Holds the storage adapter and the runtime argument map; the database and
/// profile names arrive fresh on every [`resolve`](Resolver::resolve) call.
/// Resolution reads the persisted store once and never writes it back.
pub struct Resolver<'a> {
    storage: &'a Storage,
    argument: Map<String, Value>,
}

impl<'a> Resolver<'a> {
    pub fn new(storage: &'a Storage, argument: Map<String, Value>) -> Self {
        Self { storage, argument }
    }

    /// Resolve the profiles under `names` against `database` and the store
    /// persisted under `key`.
    pub fn resolve<N: Into<ProfileNames>>(
        &self,
        key: &str,
        names: N,
        database: &Database,
    ) -> Result<StorageProfile, StorageError> {
        if let Some(level) = database
            .section(DEFAULT_PROFILE, SETTINGS)
            .and_then(|settings| settings.get(LOG_LEVEL))
            .and_then(Value::as_str)
        {
            logging::apply_log_level(level);
        }

        let name_tree = names.into();
        let names = name_tree.flatten();
        debug!(key, profiles = ?names, "resolving storage profile");

        let mut root = StorageProfile {
            settings: database.seed(SETTINGS),
            configs: database.seed(CONFIGS),
            caches: Map::new(),
        };

        // One logical read of the backing store per resolution. A host whose
        // clear leaves an empty string behind degrades to an empty store.
        let mut store = match self.storage.get_item(key, Value::Object(Map::new()))? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        persisted::normalize_sections(&mut store, &names);
        if let Some(level) = store.get(LOG_LEVEL).and_then(Value::as_str) {
            logging::apply_log_level(level);
        }

        for name in &names {
            merge_object(&mut root.configs, database.section(name, CONFIGS));
            merge_object(&mut root.caches, stored_section(&store, name, CACHES));
        }

        let merge_policy = MergePolicy::from_token(self.argument.get(POLICY_TOKEN));
        match merge_policy {
            MergePolicy::ArgumentFinal => {
                for name in &names {
                    merge_object(&mut root.settings, database.section(name, SETTINGS));
                    merge_object(&mut root.settings, stored_section(&store, name, SETTINGS));
                }
                merge_entries(&mut root.settings, &self.argument);
            }
            MergePolicy::StoreLast => {
                for name in &names {
                    merge_object(&mut root.settings, database.section(name, SETTINGS));
                    merge_object(&mut root.settings, stored_section(&store, name, SETTINGS));
                }
            }
            MergePolicy::DatabaseOnly => {
                for name in &names {
                    merge_object(&mut root.settings, database.section(name, SETTINGS));
                }
            }
            MergePolicy::StoreFinal => {
                for name in &names {
                    merge_object(&mut root.settings, database.section(name, SETTINGS));
                }
                merge_entries(&mut root.settings, &self.argument);
                for name in &names {
                    merge_object(&mut root.settings, stored_section(&store, name, SETTINGS));
                }
            }
        }

        if let Some(level) = root.settings.get(LOG_LEVEL).and_then(Value::as_str) {
            logging::apply_log_level(level);
        }

        coerce::coerce_settings(&mut root.settings);
        debug!(?merge_policy, "storage profile resolved");
        Ok(root)
    }
}

fn stored_section<'v>(
    store: &'v Map<String, Value>,
    name: &str,
    section: &str,
) -> Option<&'v Value> {
    store.get(name)?.get(section)
}
