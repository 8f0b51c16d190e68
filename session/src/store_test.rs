use super::*;
use crate::storage::MemoryStore;
use crate::test_support::{NOW, make_session, make_token, make_user};
use crate::types::Role;

// =============================================================
// Helpers
// =============================================================

fn make_store() -> (SessionStore<MemoryStore>, MemoryStore) {
    let storage = MemoryStore::new();
    (SessionStore::new(storage.clone(), AuthHeader::default()), storage)
}

/// Reads succeed from the wrapped store, writes are refused.
struct ReadOnlyStore(MemoryStore);

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.0.get(key)
    }

    fn set(&self, key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Rejected { op: "set", key: key.to_owned(), reason: "quota exceeded".to_owned() })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.0.remove(key)
    }
}

struct UnavailableStore;

impl KeyValueStore for UnavailableStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }
}

fn legacy_user_json() -> String {
    serde_json::to_string(&make_user(Role::Charity)).unwrap()
}

// =============================================================
// save / load
// =============================================================

#[test]
fn save_then_load_round_trips() {
    let (store, _) = make_store();
    let session = make_session(Role::Donor, NOW + 3600);
    store.save(&session.user, &session.token);
    assert_eq!(store.load(), Some(session));
}

#[test]
fn save_writes_single_atomic_record() {
    let (store, storage) = make_store();
    let session = make_session(Role::Admin, NOW + 60);
    store.save(&session.user, &session.token);
    assert_eq!(storage.len(), 1);
    assert!(storage.get(SESSION_KEY).unwrap().is_some());
}

#[test]
fn save_removes_leftover_legacy_keys() {
    let (store, storage) = make_store();
    storage.set(LEGACY_TOKEN_KEY, "stale").unwrap();
    let session = make_session(Role::Donor, NOW + 60);
    store.save(&session.user, &session.token);
    assert_eq!(storage.get(LEGACY_TOKEN_KEY), Ok(None));
}

#[test]
fn save_with_empty_token_keeps_prior_state() {
    let (store, _) = make_store();
    let session = make_session(Role::Donor, NOW + 60);
    store.save(&session.user, &session.token);
    store.save(&make_user(Role::Admin), "   ");
    assert_eq!(store.load(), Some(session));
}

#[test]
fn save_failure_is_silent_and_keeps_prior_state() {
    let backing = MemoryStore::new();
    let seeded = SessionStore::new(backing.clone(), AuthHeader::default());
    let session = make_session(Role::Donor, NOW + 60);
    seeded.save(&session.user, &session.token);

    let store = SessionStore::new(ReadOnlyStore(backing), AuthHeader::default());
    store.save(&make_user(Role::Admin), &make_token(NOW + 999));
    assert_eq!(store.load(), Some(session));
}

#[test]
fn load_empty_storage_is_none() {
    let (store, _) = make_store();
    assert_eq!(store.load(), None);
}

#[test]
fn load_unavailable_storage_is_none() {
    let store = SessionStore::new(UnavailableStore, AuthHeader::default());
    assert_eq!(store.load(), None);
    assert_eq!(store.auth_header().value(), None);
}

// =============================================================
// Malformed state
// =============================================================

#[test]
fn load_malformed_record_is_none_and_clears() {
    for raw in ["not json", "{}", r#"{"user": {"id": "u1"}, "token": "t"}"#, "null", "[]"] {
        let (store, storage) = make_store();
        storage.set(SESSION_KEY, raw).unwrap();
        assert_eq!(store.load(), None, "record {raw:?}");
        assert!(storage.is_empty(), "record {raw:?} not cleared");
    }
}

#[test]
fn load_record_with_empty_token_is_none() {
    let (store, storage) = make_store();
    let raw = serde_json::json!({"user": make_user(Role::Donor), "token": ""}).to_string();
    storage.set(SESSION_KEY, &raw).unwrap();
    assert_eq!(store.load(), None);
    assert!(storage.is_empty());
}

// =============================================================
// Legacy migration
// =============================================================

#[test]
fn load_migrates_legacy_pair() {
    let (store, storage) = make_store();
    let token = make_token(NOW + 60);
    storage.set(LEGACY_USER_KEY, &legacy_user_json()).unwrap();
    storage.set(LEGACY_TOKEN_KEY, &token).unwrap();

    let session = store.load().unwrap();
    assert_eq!(session.user.role, Role::Charity);
    assert_eq!(session.token, token);
    assert_eq!(storage.get(LEGACY_USER_KEY), Ok(None));
    assert_eq!(storage.get(LEGACY_TOKEN_KEY), Ok(None));
    assert!(storage.get(SESSION_KEY).unwrap().is_some());
    assert_eq!(store.load(), Some(session));
}

#[test]
fn load_half_legacy_session_is_none_and_clears() {
    let (store, storage) = make_store();
    storage.set(LEGACY_USER_KEY, &legacy_user_json()).unwrap();
    assert_eq!(store.load(), None);
    assert!(storage.is_empty());

    storage.set(LEGACY_TOKEN_KEY, &make_token(NOW + 60)).unwrap();
    assert_eq!(store.load(), None);
    assert!(storage.is_empty());
}

#[test]
fn load_legacy_with_bad_user_json_is_none_and_clears() {
    let (store, storage) = make_store();
    storage.set(LEGACY_USER_KEY, "{oops").unwrap();
    storage.set(LEGACY_TOKEN_KEY, &make_token(NOW + 60)).unwrap();
    assert_eq!(store.load(), None);
    assert!(storage.is_empty());
}

#[test]
fn load_legacy_when_migration_write_fails_still_returns_session() {
    let backing = MemoryStore::new();
    backing.set(LEGACY_USER_KEY, &legacy_user_json()).unwrap();
    backing.set(LEGACY_TOKEN_KEY, &make_token(NOW + 60)).unwrap();

    let store = SessionStore::new(ReadOnlyStore(backing.clone()), AuthHeader::default());
    assert!(store.load().is_some());
    assert!(backing.get(LEGACY_TOKEN_KEY).unwrap().is_some());
}

// =============================================================
// clear / update_user
// =============================================================

#[test]
fn clear_removes_everything() {
    let (store, storage) = make_store();
    let session = make_session(Role::Donor, NOW + 60);
    store.save(&session.user, &session.token);
    storage.set(LEGACY_USER_KEY, "{}").unwrap();
    store.clear();
    assert!(storage.is_empty());
    assert_eq!(store.load(), None);
}

#[test]
fn update_user_keeps_token() {
    let (store, _) = make_store();
    let session = make_session(Role::Donor, NOW + 60);
    store.save(&session.user, &session.token);

    let mut renamed = session.user.clone();
    renamed.full_name = "Renamed".to_owned();
    assert!(store.update_user(&renamed));

    let loaded = store.load().unwrap();
    assert_eq!(loaded.user.full_name, "Renamed");
    assert_eq!(loaded.token, session.token);
}

#[test]
fn update_user_without_session_writes_nothing() {
    let (store, storage) = make_store();
    assert!(!store.update_user(&make_user(Role::Donor)));
    assert!(storage.is_empty());
}

#[test]
fn update_user_reports_failed_write() {
    let backing = MemoryStore::new();
    let seeded = SessionStore::new(backing.clone(), AuthHeader::default());
    let session = make_session(Role::Donor, NOW + 60);
    seeded.save(&session.user, &session.token);

    let store = SessionStore::new(ReadOnlyStore(backing), AuthHeader::default());
    let mut renamed = session.user.clone();
    renamed.full_name = "Renamed".to_owned();
    assert!(!store.update_user(&renamed));
    assert_eq!(store.load().unwrap().user.full_name, session.user.full_name);
}

#[test]
fn try_save_surfaces_rejected_write() {
    let store = SessionStore::new(ReadOnlyStore(MemoryStore::new()), AuthHeader::default());
    let result = store.try_save(&make_user(Role::Donor), &make_token(NOW + 60));
    assert!(matches!(result, Err(SessionError::Storage(StorageError::Rejected { op: "set", .. }))));
    assert_eq!(store.auth_header().value(), None);
}

#[test]
fn try_save_rejects_empty_token() {
    let (store, storage) = make_store();
    assert!(matches!(store.try_save(&make_user(Role::Admin), ""), Err(SessionError::EmptyToken)));
    assert!(storage.is_empty());
}

#[test]
fn unknown_role_round_trips_through_storage() {
    let (store, _) = make_store();
    let user = make_user(Role::Unknown("moderator".to_owned()));
    store.save(&user, &make_token(NOW + 60));
    assert_eq!(store.load().unwrap().user.role, Role::Unknown("moderator".to_owned()));
}

// =============================================================
// Authorization header sync
// =============================================================

#[test]
fn auth_header_tracks_save_load_and_clear() {
    let storage = MemoryStore::new();
    let header = AuthHeader::default();
    let store = SessionStore::new(storage.clone(), header.clone());
    let token = make_token(NOW + 60);

    store.save(&make_user(Role::Donor), &token);
    assert_eq!(header.value(), Some(format!("Bearer {token}")));

    store.clear();
    assert_eq!(header.value(), None);

    let seeded = SessionStore::new(storage, AuthHeader::default());
    seeded.save(&make_user(Role::Donor), &token);
    assert_eq!(header.value(), None);
    assert!(store.load().is_some());
    assert_eq!(header.value(), Some(format!("Bearer {token}")));
}

#[test]
fn auth_header_dropped_when_load_finds_malformed_state() {
    let storage = MemoryStore::new();
    let header = AuthHeader::default();
    let store = SessionStore::new(storage.clone(), header.clone());
    store.save(&make_user(Role::Donor), &make_token(NOW + 60));

    storage.set(SESSION_KEY, "garbage").unwrap();
    assert_eq!(store.load(), None);
    assert_eq!(header.value(), None);
}
