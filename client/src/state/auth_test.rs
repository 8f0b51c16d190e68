use super::*;

// =============================================================
// AuthState
// =============================================================

#[test]
fn auth_state_default_no_user() {
    let state = AuthState::default();
    assert!(state.user.is_none());
    assert!(!state.is_signed_in());
    assert_eq!(state.role(), None);
}

#[test]
fn auth_state_role_comes_from_user() {
    let user: UserRecord =
        serde_json::from_str(r#"{"id": "a1", "email": "admin@example.com", "role": "admin"}"#).unwrap();
    let state = AuthState { user: Some(user) };
    assert!(state.is_signed_in());
    assert_eq!(state.role(), Some(Role::Admin));
}
