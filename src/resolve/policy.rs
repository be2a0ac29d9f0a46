//! Merge rules: settings source order, selected by the argument map's
//! `Storage` policy token.

use serde_json::Value;

/// Settings merge order.
///
/// `Configs` and `Caches` are unaffected: they always merge
/// database-then-store. Token comparison is exact and case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergePolicy {
    /// database -> store, then the whole argument map last
    /// (`"Argument"` / `"$argument"`).
    ArgumentFinal,

    /// database -> store (`"BoxJs"` / `"boxjs"` / `"PersistentStore"` /
    /// `"$persistentStore"`, and any unrecognized or non-string token).
    StoreLast,

    /// database only (`"database"`).
    DatabaseOnly,

    /// database, then the whole argument map, then store last (token
    /// absent). The store overrides runtime arguments here, the opposite of
    /// `ArgumentFinal`; intentional compatibility behavior.
    StoreFinal,
}

impl MergePolicy {
    /// Select the policy from the argument map's `Storage` entry.
    pub fn from_token(token: Option<&Value>) -> Self {
        match token {
            None => MergePolicy::StoreFinal,
            Some(Value::String(token)) => match token.as_str() {
                "Argument" | "$argument" => MergePolicy::ArgumentFinal,
                "database" => MergePolicy::DatabaseOnly,
                _ => MergePolicy::StoreLast,
            },
            Some(_) => MergePolicy::StoreLast,
        }
    }
}
