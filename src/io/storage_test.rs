use super::*;

#[test]
fn memory_storage_round_trips_items() {
    let mut storage = MemoryStorage::new();
    assert_eq!(storage.get_item("k"), None);
    storage.set_item("k", "v");
    assert_eq!(storage.get_item("k").as_deref(), Some("v"));
    storage.remove_item("k");
    assert_eq!(storage.get_item("k"), None);
}

#[test]
fn save_json_writes_encoded_value() {
    let mut storage = MemoryStorage::new();
    save_json(&mut storage, "list", &vec![1, 2, 3]);
    assert_eq!(storage.get_item("list").as_deref(), Some("[1,2,3]"));
}

#[test]
fn clear_empties_storage() {
    let mut storage = MemoryStorage::from(BTreeMap::from([("a".to_owned(), "1".to_owned())]));
    assert_eq!(storage.items().len(), 1);
    storage.clear();
    assert!(storage.items().is_empty());
}
