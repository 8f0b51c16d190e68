//! Injected session context shared by routes, pages, and the navbar.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` builds one [`SessionContext`] and provides it through Leptos
//! context. It pairs the persisted `SessionStore` with the reactive
//! [`AuthState`] signal so the two can only change together.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::Arc;

use leptos::prelude::*;
use session::guard::LOGIN_PATH;
use session::{AuthHeader, Decision, KeyValueStore, Policy, RouteGuard, SessionError, SessionStore};

use crate::net::types::{AuthResponse, UserRecord};
use crate::state::auth::AuthState;
use crate::util::clock::unix_now;
use crate::util::storage::BrowserStorage;

/// Shown when the browser refuses to persist a fresh session.
pub const SAVE_FAILED: &str = "Could not save your session. Check that browser storage is enabled.";

/// Session store plus its reactive mirror.
#[derive(Debug)]
pub struct SessionContext<S = BrowserStorage> {
    store: Arc<SessionStore<S>>,
    pub auth: RwSignal<AuthState>,
}

impl<S> Clone for SessionContext<S> {
    fn clone(&self) -> Self {
        Self { store: Arc::clone(&self.store), auth: self.auth }
    }
}

impl<S> SessionContext<S>
where
    S: KeyValueStore + Send + Sync + 'static,
{
    /// Load any persisted session and publish it.
    pub fn new(store: SessionStore<S>) -> Self {
        let user = store.load().map(|session| session.user);
        Self { store: Arc::new(store), auth: RwSignal::new(AuthState { user }) }
    }

    /// Header handle to share with the API client.
    pub fn auth_header(&self) -> AuthHeader {
        self.store.auth_header().clone()
    }

    /// Persist a fresh login/signup and publish the stored user.
    ///
    /// # Errors
    ///
    /// Returns the [`SessionError`] when the session could not be written;
    /// the published state then stays as it was.
    pub fn login(&self, resp: AuthResponse) -> Result<(), SessionError> {
        self.store.try_save(&resp.user, &resp.token)?;
        self.publish_stored();
        Ok(())
    }

    pub fn logout(&self) {
        self.store.clear();
        self.auth.set(AuthState::default());
    }

    /// Replace the logged-in user's record after a profile edit.
    ///
    /// Returns `false` when the session disappeared in the meantime or the
    /// write failed.
    pub fn update_user(&self, user: &UserRecord) -> bool {
        let updated = self.store.update_user(user);
        self.publish_stored();
        updated
    }

    /// Run the route guard for a navigation to `requested`.
    pub fn check(&self, policy: &Policy, requested: &str) -> Decision {
        let decision = RouteGuard::check(&self.store, policy, requested, unix_now());
        // A login redirect means nothing is persisted any more.
        if matches!(&decision, Decision::Redirect { to, .. } if to == LOGIN_PATH)
            && self.auth.with_untracked(AuthState::is_signed_in)
        {
            self.auth.set(AuthState::default());
        }
        decision
    }

    fn publish_stored(&self) {
        let user = self.store.load().map(|session| session.user);
        self.auth.set(AuthState { user });
    }
}
