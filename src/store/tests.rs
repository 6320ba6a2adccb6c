use super::{Collection, Store, StoreError};
use crate::db;
use crate::domain::Material;
use std::path::PathBuf;
use uuid::Uuid;

fn unique_store() -> (Store, PathBuf) {
    let root = std::env::temp_dir().join(format!("districtworks-store-{}", Uuid::now_v7()));
    std::fs::create_dir_all(&root).expect("temp workspace should be creatable");
    let path = root.join("state.sqlite");
    let store = Store::open(path.to_str().expect("utf8 path")).expect("store should open");
    (store, root)
}

fn material(id: u64, used: u64) -> Material {
    Material {
        id,
        name: "Cement".to_string(),
        unit: "bags".to_string(),
        unit_price: 350.0,
        project_id: 1,
        allocated: 500,
        used,
    }
}

#[test]
fn absent_collection_reads_as_empty() {
    let (store, root) = unique_store();
    let materials: Vec<Material> = store
        .read(Collection::Materials)
        .expect("absent collection should read");
    assert!(materials.is_empty());
    assert!(!store.is_initialized().expect("init probe should work"));
    let _ = std::fs::remove_dir_all(root);
}

#[test]
fn write_replaces_the_whole_collection() {
    let (store, root) = unique_store();
    store
        .write(Collection::Materials, &[material(1, 10), material(2, 20)])
        .expect("first write should succeed");
    store
        .write(Collection::Materials, &[material(2, 30)])
        .expect("second write should succeed");

    let materials: Vec<Material> = store.read(Collection::Materials).expect("read");
    assert_eq!(materials, vec![material(2, 30)]);

    let raw = db::get_kv(store.conn(), "materials")
        .expect("raw read")
        .expect("blob should exist");
    assert!(raw.contains("\"unitPrice\":350.0"));
    let _ = std::fs::remove_dir_all(root);
}

#[test]
fn next_id_returns_current_then_increments() {
    let (store, root) = unique_store();
    assert_eq!(store.next_id(Collection::Tasks).expect("first id"), 1);
    assert_eq!(store.next_id(Collection::Tasks).expect("second id"), 2);
    assert_eq!(store.next_id(Collection::Projects).expect("own counter"), 1);

    store
        .set_counter(Collection::Tasks, 40)
        .expect("counter should be settable");
    assert_eq!(store.next_id(Collection::Tasks).expect("resumed id"), 40);
    assert_eq!(
        db::get_kv(store.conn(), "nextTaskId").expect("raw counter"),
        Some("41".to_string())
    );
    let _ = std::fs::remove_dir_all(root);
}

#[test]
fn malformed_blob_and_counter_surface_errors() {
    let (store, root) = unique_store();
    db::set_kv(store.conn(), "materials", "[{\"id\":1}]").expect("raw write");
    let err = store
        .read::<Material>(Collection::Materials)
        .expect_err("missing fields should fail to decode");
    assert!(matches!(err, StoreError::Decode { key: "materials", .. }));

    db::set_kv(store.conn(), "nextUserId", "four").expect("raw write");
    let err = store
        .next_id(Collection::Users)
        .expect_err("non-integer counter should fail");
    assert!(matches!(err, StoreError::Counter { key: "nextUserId", .. }));
    let _ = std::fs::remove_dir_all(root);
}

#[test]
fn clear_removes_collections_and_counters() {
    let (store, root) = unique_store();
    store
        .write(Collection::Users, &Vec::<Material>::new())
        .expect("write");
    store.next_id(Collection::Users).expect("counter");
    assert!(store.is_initialized().expect("probe"));

    store.clear().expect("clear should succeed");
    assert!(!store.is_initialized().expect("probe"));
    assert_eq!(store.peek_counter(Collection::Users).expect("peek"), 1);
    let _ = std::fs::remove_dir_all(root);
}
