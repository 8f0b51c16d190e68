use super::*;
use crate::storage::MemoryStore;
use crate::store::AuthHeader;
use crate::test_support::{NOW, make_session, make_user};

// =============================================================
// Helpers
// =============================================================

fn store_with(session: Option<&Session>) -> SessionStore<MemoryStore> {
    let store = SessionStore::new(MemoryStore::new(), AuthHeader::default());
    if let Some(session) = session {
        store.save(&session.user, &session.token);
    }
    store
}

fn donor_only() -> Policy {
    Policy::roles([Role::Donor])
}

fn redirect(to: &str) -> Decision {
    Decision::Redirect { to: to.to_owned(), from: None }
}

// =============================================================
// role_home
// =============================================================

#[test]
fn role_home_maps_each_role() {
    assert_eq!(role_home(&Role::Donor), "/donor");
    assert_eq!(role_home(&Role::Charity), "/charity");
    assert_eq!(role_home(&Role::Individual), "/charity");
    assert_eq!(role_home(&Role::Admin), "/admin");
    assert_eq!(role_home(&Role::Unknown("guest".to_owned())), "/");
}

// =============================================================
// PublicOnly
// =============================================================

#[test]
fn public_only_renders_for_anonymous_visitor() {
    let store = store_with(None);
    assert_eq!(RouteGuard::check(&store, &Policy::PublicOnly, "/login", NOW), Decision::Render);
}

#[test]
fn public_only_redirects_signed_in_users_to_role_home() {
    for (role, home) in [
        (Role::Donor, "/donor"),
        (Role::Charity, "/charity"),
        (Role::Individual, "/charity"),
        (Role::Admin, "/admin"),
        (Role::Unknown("guest".to_owned()), "/"),
    ] {
        let store = store_with(Some(&make_session(role.clone(), NOW + 3600)));
        assert_eq!(RouteGuard::check(&store, &Policy::PublicOnly, "/login", NOW), redirect(home), "{role:?}");
    }
}

#[test]
fn public_only_renders_when_token_expired() {
    let session = make_session(Role::Donor, NOW - 1);
    assert!(matches!(evaluate(&Policy::PublicOnly, Some(&session), NOW), Verdict::Render));
}

#[test]
fn public_only_renders_when_token_undecodable() {
    let mut session = make_session(Role::Admin, NOW + 60);
    session.token = "opaque".to_owned();
    assert!(matches!(evaluate(&Policy::PublicOnly, Some(&session), NOW), Verdict::Render));
}

// =============================================================
// Missing session
// =============================================================

#[test]
fn no_session_redirects_to_login_with_origin() {
    let store = store_with(None);
    let decision = RouteGuard::check(&store, &donor_only(), "/donor", NOW);
    assert_eq!(decision, Decision::Redirect { to: "/login".to_owned(), from: Some("/donor".to_owned()) });
}

#[test]
fn open_policy_requires_a_session() {
    let store = store_with(None);
    let decision = RouteGuard::check(&store, &Policy::Open, "/profile", NOW);
    assert_eq!(decision.target().as_deref(), Some("/login?from=%2Fprofile"));
}

// =============================================================
// Token expiry
// =============================================================

#[test]
fn live_token_with_allowed_role_renders() {
    let store = store_with(Some(&make_session(Role::Donor, NOW + 3600)));
    assert_eq!(RouteGuard::check(&store, &donor_only(), "/donor", NOW), Decision::Render);
}

#[test]
fn expired_token_clears_session_and_redirects() {
    let store = store_with(Some(&make_session(Role::Donor, NOW - 1)));
    assert_eq!(RouteGuard::check(&store, &donor_only(), "/donor", NOW), redirect("/login"));
    assert_eq!(store.load(), None);
    assert_eq!(store.auth_header().value(), None);
}

#[test]
fn token_expiring_exactly_now_is_expired() {
    let session = make_session(Role::Donor, NOW);
    assert!(matches!(evaluate(&donor_only(), Some(&session), NOW), Verdict::Expired(None)));
}

#[test]
fn undecodable_token_clears_session_and_redirects() {
    let mut session = make_session(Role::Donor, NOW + 3600);
    session.token = "not-a-token".to_owned();
    let store = store_with(Some(&session));
    assert_eq!(RouteGuard::check(&store, &Policy::Open, "/profile", NOW), redirect("/login"));
    assert_eq!(store.load(), None);
}

#[test]
fn undecodable_token_verdict_carries_reason() {
    let mut session = make_session(Role::Donor, NOW + 3600);
    session.token = "a.b".to_owned();
    assert!(matches!(
        evaluate(&Policy::Open, Some(&session), NOW),
        Verdict::Expired(Some(TokenError::Segments(2)))
    ));
}

// =============================================================
// Role restriction
// =============================================================

#[test]
fn wrong_role_redirects_home_without_clearing() {
    let store = store_with(Some(&make_session(Role::Charity, NOW + 3600)));
    assert_eq!(RouteGuard::check(&store, &donor_only(), "/donor", NOW), redirect("/"));
    assert!(store.load().is_some());
}

#[test]
fn multi_role_policy_admits_each_listed_role() {
    let policy = Policy::roles([Role::Charity, Role::Individual]);
    for role in [Role::Charity, Role::Individual] {
        let session = make_session(role, NOW + 60);
        assert!(matches!(evaluate(&policy, Some(&session), NOW), Verdict::Render));
    }
    let admin = make_session(Role::Admin, NOW + 60);
    assert!(matches!(evaluate(&policy, Some(&admin), NOW), Verdict::Forbidden));
}

#[test]
fn empty_role_set_admits_any_authenticated_role() {
    let policy = Policy::RoleRestricted(Vec::new());
    for role in [Role::Donor, Role::Charity, Role::Individual, Role::Admin, Role::Unknown("guest".to_owned())] {
        let session = make_session(role.clone(), NOW + 60);
        assert!(matches!(evaluate(&policy, Some(&session), NOW), Verdict::Render), "{role:?}");
    }
}

#[test]
fn unknown_role_is_forbidden_from_restricted_routes() {
    let session = make_session(Role::Unknown("guest".to_owned()), NOW + 60);
    assert!(matches!(evaluate(&Policy::roles([Role::Admin]), Some(&session), NOW), Verdict::Forbidden));
}

#[test]
fn expiry_is_checked_before_role() {
    let session = make_session(Role::Charity, NOW - 10);
    assert!(matches!(evaluate(&donor_only(), Some(&session), NOW), Verdict::Expired(None)));
}

// =============================================================
// Decision::target
// =============================================================

#[test]
fn target_is_none_for_render() {
    assert_eq!(Decision::Render.target(), None);
}

#[test]
fn target_encodes_origin_query() {
    let decision = Decision::Redirect { to: "/login".to_owned(), from: Some("/my-claims?tab=open".to_owned()) };
    assert_eq!(decision.target().as_deref(), Some("/login?from=%2Fmy-claims%3Ftab%3Dopen"));
}

#[test]
fn guard_reevaluates_each_navigation() {
    let store = store_with(None);
    assert_ne!(RouteGuard::check(&store, &donor_only(), "/donor", NOW), Decision::Render);
    store.save(&make_user(Role::Donor), &crate::test_support::make_token(NOW + 60));
    assert_eq!(RouteGuard::check(&store, &donor_only(), "/donor", NOW), Decision::Render);
}
