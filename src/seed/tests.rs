use super::{seed_admin_only, seed_demo_data};
use crate::domain::{Project, Role, User};
use crate::store::{Collection, Store};
use uuid::Uuid;

fn unique_store() -> (Store, std::path::PathBuf) {
    let root = std::env::temp_dir().join(format!("districtworks-seed-{}", Uuid::now_v7()));
    std::fs::create_dir_all(&root).expect("temp workspace should be creatable");
    let path = root.join("state.sqlite");
    let store = Store::open(path.to_str().expect("utf8 path")).expect("store should open");
    (store, root)
}

#[test]
fn demo_counters_resume_after_seeded_ids() {
    let (store, root) = unique_store();
    seed_demo_data(&store, "Hill District").expect("seed should succeed");
    let users: Vec<User> = store.read(Collection::Users).expect("users should decode");
    assert_eq!(users.len(), 3);
    assert!(users
        .iter()
        .all(|user| user.district.as_deref() == Some("Hill District")));
    assert_eq!(store.next_id(Collection::Users).expect("next id"), 4);
    assert_eq!(store.next_id(Collection::Feedback).expect("next id"), 2);
    let _ = std::fs::remove_dir_all(root);
}

#[test]
fn admin_only_seed_leaves_collections_empty() {
    let (store, root) = unique_store();
    seed_admin_only(&store, "Central District").expect("seed should succeed");
    let users: Vec<User> = store.read(Collection::Users).expect("users should decode");
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].role, Role::Admin);
    let projects: Vec<Project> = store.read(Collection::Projects).expect("projects");
    assert!(projects.is_empty());
    assert!(store.is_initialized().expect("initialized check"));
    assert_eq!(store.next_id(Collection::Users).expect("next id"), 2);
    assert_eq!(store.next_id(Collection::Projects).expect("next id"), 1);
    let _ = std::fs::remove_dir_all(root);
}

#[test]
fn failed_seed_leaves_the_store_uninitialized() {
    let (store, root) = unique_store();
    store
        .conn()
        .execute_batch(
            "CREATE TRIGGER refuse_tasks BEFORE INSERT ON kv WHEN NEW.key = 'tasks'
             BEGIN SELECT RAISE(ABORT, 'tasks are read-only'); END;",
        )
        .expect("trigger should install");

    assert!(seed_demo_data(&store, "Central District").is_err());
    assert!(!store.is_initialized().expect("initialized check"));
    assert_eq!(store.peek_counter(Collection::Users).expect("counter"), 1);
    let _ = std::fs::remove_dir_all(root);
}
