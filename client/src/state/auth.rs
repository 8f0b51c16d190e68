//! Auth state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Read by the navbar and pages for identity-dependent rendering. Written
//! only through [`crate::state::session::SessionContext`].

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::{Role, UserRecord};

/// Authentication state tracking the current user.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<UserRecord>,
}

impl AuthState {
    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|user| user.role.clone())
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }
}
