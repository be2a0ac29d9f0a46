//! Integration tests for the standalone-runtime file backend

use layerstore::resolve::{Database, Resolver};
use layerstore::storage::{FileBackend, Storage, StorageBackend};
use serde_json::{json, Map, Value};
use tempfile::TempDir;

fn file_storage(temp_dir: &TempDir) -> Storage {
    // An absolute data-file path keeps the test out of the real working
    // directory.
    Storage::new(Box::new(FileBackend::new(
        temp_dir.path().join("box.dat"),
        temp_dir.path(),
    )))
}

#[test]
fn test_roundtrip_persists_to_disk() {
    let temp_dir = TempDir::new().unwrap();
    let storage = file_storage(&temp_dir);

    assert!(storage.set_item("profile", &json!({"a": 1})).unwrap());
    assert_eq!(
        storage.get_item("profile", Value::Null).unwrap(),
        json!({"a": 1})
    );

    // A fresh adapter over the same file sees the data.
    let reopened = file_storage(&temp_dir);
    assert_eq!(
        reopened.get_item("profile", Value::Null).unwrap(),
        json!({"a": 1})
    );
}

#[test]
fn test_missing_file_reads_as_empty() {
    let temp_dir = TempDir::new().unwrap();
    let storage = file_storage(&temp_dir);
    assert_eq!(
        storage.get_item("anything", json!("default")).unwrap(),
        json!("default")
    );
}

#[test]
fn test_malformed_file_degrades_to_empty_mapping() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("box.dat"), "{ not json").unwrap();
    let storage = file_storage(&temp_dir);

    assert_eq!(
        storage.get_item("anything", json!("default")).unwrap(),
        json!("default")
    );
    // Writing over the malformed file starts from the empty mapping.
    assert!(storage.set_item("k", &json!("v")).unwrap());
    assert_eq!(storage.get_item("k", Value::Null).unwrap(), json!("v"));
}

#[test]
fn test_erase_and_clear_supported() {
    let temp_dir = TempDir::new().unwrap();
    let storage = file_storage(&temp_dir);

    assert!(storage.set_item("a", &json!(1)).unwrap());
    assert!(storage.set_item("b", &json!(2)).unwrap());

    assert!(storage.remove_item("a").unwrap());
    assert_eq!(storage.get_item("a", json!("gone")).unwrap(), json!("gone"));
    assert_eq!(storage.get_item("b", Value::Null).unwrap(), json!(2));

    assert!(storage.clear());
    assert_eq!(storage.get_item("b", json!("gone")).unwrap(), json!("gone"));
}

#[test]
fn test_whole_file_rewrite_keeps_sibling_keys() {
    let temp_dir = TempDir::new().unwrap();
    let storage = file_storage(&temp_dir);

    assert!(storage.set_item("x", &json!(1)).unwrap());
    assert!(storage.set_item("y", &json!(2)).unwrap());

    let on_disk: Value = serde_json::from_str(
        &std::fs::read_to_string(temp_dir.path().join("box.dat")).unwrap(),
    )
    .unwrap();
    assert_eq!(on_disk, json!({"x": "1", "y": "2"}));
}

#[test]
fn test_process_root_fallback_when_cwd_candidate_missing() {
    let temp_dir = TempDir::new().unwrap();
    let data_file = "layerstore-test-fallback.dat";
    std::fs::write(
        temp_dir.path().join(data_file),
        json!({"k": "\"from-root\""}).to_string(),
    )
    .unwrap();

    // Relative data-file name: the cwd candidate does not exist, so the
    // process-root candidate wins.
    let backend = FileBackend::new(data_file, temp_dir.path());
    assert_eq!(backend.read("k"), Some("\"from-root\"".to_string()));
}

#[test]
fn test_resolution_over_file_backed_storage() {
    let temp_dir = TempDir::new().unwrap();
    let storage = file_storage(&temp_dir);
    storage
        .set_item("root", &json!({"mod": {"Settings": {"x": "7"}}}))
        .unwrap();

    let resolver = Resolver::new(&storage, Map::new());
    let database = Database::from(json!({"mod": {"Settings": {"x": "1", "y": "2"}}}));
    let profile = resolver.resolve("root", "mod", &database).unwrap();

    assert_eq!(profile.settings["x"], json!(7));
    assert_eq!(profile.settings["y"], json!(2));
}
