use super::*;
use crate::state::storage::{MemoryStore, StorageError};
use crate::test_support::{FailingStore, sample_user};

fn store() -> (SessionStore, Rc<MemoryStore>) {
    let storage = Rc::new(MemoryStore::new());
    (SessionStore::new(storage.clone()), storage)
}

#[test]
fn token_round_trips_exactly() {
    let (store, _) = store();
    for token in ["t", "eyJhbGciOiJIUzUxMiJ9.e30.sig", "  spaced  ", "ünïcode"] {
        store.save_token(token).unwrap();
        assert_eq!(store.token().as_deref(), Some(token));
    }
}

#[test]
fn save_token_replaces_previous_value() {
    let (store, storage) = store();
    store.save_token("old").unwrap();
    store.save_token("new").unwrap();
    assert_eq!(store.token().as_deref(), Some("new"));
    assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("new"));
}

#[test]
fn save_token_rejects_empty_token() {
    let (store, _) = store();
    store.save_token("kept").unwrap();
    assert!(matches!(store.save_token(""), Err(SessionError::EmptyToken)));
    assert_eq!(store.token().as_deref(), Some("kept"));
}

#[test]
fn empty_stored_token_reads_as_absent() {
    let (store, storage) = store();
    storage.set(TOKEN_KEY, "").unwrap();
    assert_eq!(store.token(), None);
    assert!(!store.has_token());
}

#[test]
fn user_round_trips_deep_equal() {
    let (store, storage) = store();
    let user = sample_user();
    store.save_user(&user).unwrap();
    assert_eq!(store.user(), Some(user));
    assert!(storage.get(USER_KEY).unwrap().contains("\"displayName\":\"nhxv\""));
}

#[test]
fn user_absent_when_nothing_stored() {
    let (store, _) = store();
    assert_eq!(store.user(), None);
}

#[test]
fn corrupted_user_reads_as_absent() {
    let (store, storage) = store();
    storage.set(USER_KEY, "{not json").unwrap();
    assert_eq!(store.user(), None);
    storage.set(USER_KEY, r#"{"id": 5}"#).unwrap();
    assert_eq!(store.user(), None);
}

#[test]
fn clear_erases_token_user_and_other_keys() {
    let (store, storage) = store();
    store.save_token("t").unwrap();
    store.save_user(&sample_user()).unwrap();
    storage.set("draft", "x").unwrap();

    store.clear().unwrap();

    assert_eq!(store.token(), None);
    assert_eq!(store.user(), None);
    assert!(storage.is_empty());
}

// =============================================================
// Storage failures
// =============================================================

#[test]
fn rejected_writes_surface_as_storage_errors() {
    let storage = FailingStore::new();
    let store = SessionStore::new(storage.clone());
    storage.fail_set.set(true);

    assert!(matches!(
        store.save_token("t"),
        Err(SessionError::Storage(StorageError::Write { ref key, .. })) if key == TOKEN_KEY
    ));
    assert!(matches!(
        store.save_user(&sample_user()),
        Err(SessionError::Storage(StorageError::Write { ref key, .. })) if key == USER_KEY
    ));
    assert_eq!(store.token(), None);
}

#[test]
fn clear_falls_back_to_removing_auth_keys() {
    let storage = FailingStore::new();
    let store = SessionStore::new(storage.clone());
    store.save_token("t").unwrap();
    store.save_user(&sample_user()).unwrap();
    storage.inner.set("draft", "x").unwrap();
    storage.fail_clear.set(true);

    store.clear().unwrap();

    assert_eq!(store.token(), None);
    assert_eq!(store.user(), None);
    assert_eq!(storage.get("draft").as_deref(), Some("x"));
}

#[test]
fn clear_reports_error_when_auth_keys_cannot_be_removed() {
    let storage = FailingStore::new();
    let store = SessionStore::new(storage.clone());
    store.save_token("t").unwrap();
    storage.fail_all();

    assert_eq!(store.clear(), Err(SessionError::Storage(StorageError::Unavailable)));
    assert_eq!(store.token().as_deref(), Some("t"));
}
