use super::*;
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use session::{KeyValueStore, MemoryStore, Role, StorageError};

// =============================================================
// Helpers
// =============================================================

fn make_token(exp_offset_secs: i64) -> String {
    let payload = format!(r#"{{"exp":{}}}"#, unix_now() + exp_offset_secs);
    format!("e30.{}.sig", URL_SAFE_NO_PAD.encode(payload))
}

fn make_user(role: Role) -> UserRecord {
    serde_json::from_value(serde_json::json!({
        "id": "u1",
        "full_name": "Pat",
        "email": "pat@example.com",
        "role": role.as_str(),
    }))
    .unwrap()
}

/// Serves reads from the wrapped store and refuses every write.
#[derive(Clone)]
struct FullStore(MemoryStore);

impl KeyValueStore for FullStore {
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

fn make_context() -> (SessionContext<MemoryStore>, MemoryStore) {
    let storage = MemoryStore::new();
    let ctx = SessionContext::new(SessionStore::new(storage.clone(), AuthHeader::default()));
    (ctx, storage)
}

// =============================================================
// Bootstrap
// =============================================================

#[test]
fn new_publishes_persisted_user() {
    let storage = MemoryStore::new();
    let seed = SessionStore::new(storage.clone(), AuthHeader::default());
    seed.save(&make_user(Role::Donor), &make_token(3600));

    let ctx = SessionContext::new(SessionStore::new(storage, AuthHeader::default()));
    assert_eq!(ctx.auth.get_untracked().role(), Some(Role::Donor));
    assert!(ctx.auth_header().value().is_some());
}

#[test]
fn new_without_session_is_signed_out() {
    let (ctx, _) = make_context();
    assert!(!ctx.auth.get_untracked().is_signed_in());
}

// =============================================================
// login / logout / update_user
// =============================================================

#[test]
fn login_persists_and_publishes() {
    let (ctx, storage) = make_context();
    let token = make_token(3600);
    ctx.login(AuthResponse { user: make_user(Role::Charity), token: token.clone() }).unwrap();

    assert_eq!(ctx.auth.get_untracked().role(), Some(Role::Charity));
    assert_eq!(ctx.auth_header().value(), Some(format!("Bearer {token}")));
    assert!(!storage.is_empty());
}

#[test]
fn login_reports_unwritable_storage_and_stays_signed_out() {
    let ctx = SessionContext::new(SessionStore::new(FullStore(MemoryStore::new()), AuthHeader::default()));
    let result = ctx.login(AuthResponse { user: make_user(Role::Donor), token: make_token(3600) });

    assert!(matches!(result, Err(SessionError::Storage(_))));
    assert!(!ctx.auth.get_untracked().is_signed_in());
    assert_eq!(ctx.auth_header().value(), None);
}

#[test]
fn logout_clears_storage_and_state() {
    let (ctx, storage) = make_context();
    ctx.login(AuthResponse { user: make_user(Role::Admin), token: make_token(3600) }).unwrap();
    ctx.logout();

    assert!(storage.is_empty());
    assert!(!ctx.auth.get_untracked().is_signed_in());
    assert_eq!(ctx.auth_header().value(), None);
}

#[test]
fn update_user_replaces_published_user() {
    let (ctx, _) = make_context();
    ctx.login(AuthResponse { user: make_user(Role::Donor), token: make_token(3600) }).unwrap();

    let mut renamed = make_user(Role::Donor);
    renamed.full_name = "Patricia".to_owned();
    assert!(ctx.update_user(&renamed));
    assert_eq!(ctx.auth.get_untracked().user.map(|u| u.full_name), Some("Patricia".to_owned()));
}

#[test]
fn update_user_reports_unwritable_storage() {
    let storage = MemoryStore::new();
    let seed = SessionStore::new(storage.clone(), AuthHeader::default());
    seed.save(&make_user(Role::Donor), &make_token(3600));

    let ctx = SessionContext::new(SessionStore::new(FullStore(storage), AuthHeader::default()));
    let mut renamed = make_user(Role::Donor);
    renamed.full_name = "Patricia".to_owned();
    assert!(!ctx.update_user(&renamed));
    assert_eq!(ctx.auth.get_untracked().user.map(|u| u.full_name), Some("Pat".to_owned()));
}

#[test]
fn update_user_without_session_is_rejected() {
    let (ctx, _) = make_context();
    assert!(!ctx.update_user(&make_user(Role::Donor)));
    assert!(!ctx.auth.get_untracked().is_signed_in());
}

// =============================================================
// check
// =============================================================

#[test]
fn check_expired_session_signs_out() {
    let (ctx, storage) = make_context();
    ctx.login(AuthResponse { user: make_user(Role::Donor), token: make_token(-10) }).unwrap();
    assert!(ctx.auth.get_untracked().is_signed_in());

    let decision = ctx.check(&Policy::roles([Role::Donor]), "/donor");
    assert_eq!(decision, Decision::Redirect { to: "/login".to_owned(), from: None });
    assert!(!ctx.auth.get_untracked().is_signed_in());
    assert!(storage.is_empty());
}

#[test]
fn check_live_session_renders() {
    let (ctx, _) = make_context();
    ctx.login(AuthResponse { user: make_user(Role::Donor), token: make_token(3600) }).unwrap();
    assert_eq!(ctx.check(&Policy::roles([Role::Donor]), "/donor"), Decision::Render);
}

#[test]
fn check_wrong_role_keeps_user_signed_in() {
    let (ctx, _) = make_context();
    ctx.login(AuthResponse { user: make_user(Role::Individual), token: make_token(3600) }).unwrap();
    let decision = ctx.check(&Policy::roles([Role::Admin]), "/admin");
    assert_eq!(decision.target().as_deref(), Some("/"));
    assert!(ctx.auth.get_untracked().is_signed_in());
}
