use std::fs;
use tempfile::TempDir;
use vault::error::VaultError;
use vault::model::RecordId;
use vault::store::fs::FileStore;
use vault::store::RecordStore;

#[test]
fn test_records_survive_reopen() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("vault.json");

    let added = {
        let mut store = FileStore::open_file(&path).unwrap();
        let a = store.add("Alice", "x").unwrap();
        store.add("Bob", "y").unwrap();
        store.update(&a.id, "Alicia", "z").unwrap();
        a
    };

    let store = FileStore::open_file(&path).unwrap();
    let records = store.list().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].name, "Alicia");
    assert_eq!(records[0].created, added.created);
    assert_eq!(records[1].name, "Bob");
}

#[test]
fn test_deleted_ids_stay_retired_after_reopen() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("vault.json");

    {
        let mut store = FileStore::open_file(&path).unwrap();
        store.add("a", "").unwrap();
        let b = store.add("b", "").unwrap();
        assert!(store.delete(&b.id).unwrap());
    }

    let mut store = FileStore::open_file(&path).unwrap();
    let c = store.add("c", "").unwrap();
    assert_eq!(c.id, RecordId::Local(3));
}

#[test]
fn test_creates_missing_directories_and_leaves_no_temp_files() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("nested").join("data");
    let path = dir.join("vault.json");

    let mut store = FileStore::open_file(&path).unwrap();
    assert!(store.list().unwrap().is_empty());
    assert!(!path.exists());

    store.add("a", "1").unwrap();
    store.add("b", "2").unwrap();

    let entries: Vec<_> = fs::read_dir(&dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(entries, vec!["vault.json".to_string()]);
}

#[test]
fn test_loads_legacy_array_and_rewrites_envelope() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("vault.json");
    fs::write(
        &path,
        r#"[
            {"id": 4, "name": "old", "value": "v", "created": "2023-02-14"},
            {"id": 7, "name": "older", "value": "w", "created": "sometime"},
            {"id": 5, "name": "precise", "value": "", "created": "2024-01-01T00:00:00.123456+05:00"}
        ]"#,
    )
    .unwrap();

    let mut store = FileStore::open_file(&path).unwrap();
    assert_eq!(store.list().unwrap().len(), 3);

    let added = store.add("new", "").unwrap();
    assert_eq!(added.id, RecordId::Local(8));

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("\"next_id\": 9"));
    assert!(content.contains("\"created\": \"sometime\""));
    // Untouched fields keep their source text.
    assert!(content.contains("\"created\": \"2023-02-14\""));
    assert!(content.contains("\"created\": \"2024-01-01T00:00:00.123456+05:00\""));
}

#[test]
fn test_corrupt_file_is_a_storage_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("vault.json");
    fs::write(&path, "{ this is not json").unwrap();

    match FileStore::open_file(&path) {
        Err(VaultError::Storage(_)) => {}
        Err(other) => panic!("expected a storage error, got {:?}", other),
        Ok(_) => panic!("expected a storage error"),
    }
}

#[test]
fn test_empty_file_is_an_empty_store() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("vault.json");
    fs::write(&path, "").unwrap();

    let mut store = FileStore::open_file(&path).unwrap();
    assert!(store.list().unwrap().is_empty());
    assert_eq!(store.add("first", "").unwrap().id, RecordId::Local(1));
    assert_eq!(store.data_file(), path.as_path());
}
