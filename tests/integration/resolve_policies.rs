//! Policy-table determinism for settings merge ordering

use layerstore::resolve::{Database, Resolver, StorageProfile};
use layerstore::storage::Storage;
use serde_json::{json, Map, Value};

/// Fixture with a conflicting `k` leaf in all three sources.
fn fixture_storage() -> Storage {
    let storage = Storage::in_memory();
    storage
        .set_item("root", &json!({"mod": {"Settings": {"k": "store"}}}))
        .unwrap();
    storage
}

fn fixture_database() -> Database {
    Database::from(json!({"mod": {"Settings": {"k": "db", "db_only": "yes"}}}))
}

fn argument_with(token: Option<&str>) -> Map<String, Value> {
    let mut argument = Map::new();
    argument.insert("k".to_string(), json!("arg"));
    argument.insert("extra_arg".to_string(), json!("yes"));
    if let Some(token) = token {
        argument.insert("Storage".to_string(), json!(token));
    }
    argument
}

fn resolve_with(token: Option<&str>) -> StorageProfile {
    let storage = fixture_storage();
    let resolver = Resolver::new(&storage, argument_with(token));
    resolver.resolve("root", "mod", &fixture_database()).unwrap()
}

#[test]
fn test_argument_token_puts_argument_last() {
    let profile = resolve_with(Some("Argument"));
    assert_eq!(profile.settings["k"], json!("arg"));
    assert_eq!(profile.settings["extra_arg"], json!("yes"));
}

#[test]
fn test_store_aliases_merge_database_then_store() {
    for token in ["BoxJs", "boxjs", "PersistentStore", "$persistentStore"] {
        let profile = resolve_with(Some(token));
        assert_eq!(profile.settings["k"], json!("store"), "token {token}");
        // The argument map is never folded in on this branch.
        assert!(!profile.settings.contains_key("extra_arg"), "token {token}");
    }
}

#[test]
fn test_unrecognized_token_uses_store_branch() {
    let profile = resolve_with(Some("SomethingElse"));
    assert_eq!(profile.settings["k"], json!("store"));
    assert!(!profile.settings.contains_key("extra_arg"));
}

#[test]
fn test_database_token_merges_database_only() {
    let profile = resolve_with(Some("database"));
    assert_eq!(profile.settings["k"], json!("db"));
    assert_eq!(profile.settings["db_only"], json!("yes"));
    assert!(!profile.settings.contains_key("extra_arg"));
}

#[test]
fn test_absent_token_lets_store_override_argument() {
    let profile = resolve_with(None);
    // Asymmetry with the "Argument" token: the argument map folds in
    // between the database and store passes, so persisted state wins.
    assert_eq!(profile.settings["k"], json!("store"));
    assert_eq!(profile.settings["extra_arg"], json!("yes"));
}

#[test]
fn test_four_policies_produce_distinct_settings() {
    let results = [
        resolve_with(None).settings,
        resolve_with(Some("Argument")).settings,
        resolve_with(Some("BoxJs")).settings,
        resolve_with(Some("database")).settings,
    ];
    for (i, a) in results.iter().enumerate() {
        for b in results.iter().skip(i + 1) {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn test_policy_is_deterministic() {
    for token in [None, Some("Argument"), Some("BoxJs"), Some("database")] {
        assert_eq!(resolve_with(token), resolve_with(token));
    }
}
