//! Per-navigation access control.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every guarded route asks [`RouteGuard::check`] before rendering. The
//! decision is rebuilt from the persisted session on each navigation; the
//! guard itself holds nothing between calls.
//!
//! [`evaluate`] is the pure part: `(policy, session, now) -> Verdict`.
//! [`RouteGuard::check`] applies the one side effect (forced logout on a
//! dead token) and maps the verdict to a redirect target.
//!
//! Denials are silent. Wrong-role visitors land on `/`, signed-in visitors
//! of login/signup land on their role home, and nobody sees an error page.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::storage::KeyValueStore;
use crate::store::SessionStore;
use crate::token::{TokenError, decode_claims};
use crate::types::{Role, Session};

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";

/// Access mode declared by a route.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Policy {
    /// Only visitors without a live session (login, signup).
    PublicOnly,
    /// Any authenticated user.
    Open,
    /// Authenticated users whose role is listed; an empty list admits any role.
    RoleRestricted(Vec<Role>),
}

impl Policy {
    pub fn roles(roles: impl IntoIterator<Item = Role>) -> Self {
        Self::RoleRestricted(roles.into_iter().collect())
    }

    fn admits(&self, role: &Role) -> bool {
        match self {
            Self::RoleRestricted(allowed) => allowed.is_empty() || allowed.contains(role),
            Self::Open | Self::PublicOnly => true,
        }
    }
}

/// Pure outcome of evaluating a policy against a session.
#[derive(Debug)]
pub enum Verdict {
    Render,
    /// No session; the visitor must log in.
    SignIn,
    /// The session's token is undecodable or past its expiry.
    Expired(Option<TokenError>),
    /// Authenticated, but the role is not allowed here.
    Forbidden,
    /// A public-only page was requested by someone already logged in.
    SignedIn(Role),
}

/// What the router should do with a navigation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    Render,
    Redirect {
        to: String,
        /// Originally requested location, for returning after login.
        from: Option<String>,
    },
}

impl Decision {
    fn redirect(to: &str) -> Self {
        Self::Redirect { to: to.to_owned(), from: None }
    }

    /// Full navigation target, carrying `from` as a query parameter.
    #[must_use]
    pub fn target(&self) -> Option<String> {
        match self {
            Self::Render => None,
            Self::Redirect { to, from: None } => Some(to.clone()),
            Self::Redirect { to, from: Some(from) } => Some(format!("{to}?from={}", urlencoding::encode(from))),
        }
    }
}

/// Canonical landing path for a role.
#[must_use]
pub fn role_home(role: &Role) -> &'static str {
    match role {
        Role::Donor => "/donor",
        Role::Charity | Role::Individual => "/charity",
        Role::Admin => "/admin",
        Role::Unknown(_) => HOME_PATH,
    }
}

/// Decide access for `policy` given `session` at `now_secs` (Unix seconds).
pub fn evaluate(policy: &Policy, session: Option<&Session>, now_secs: i64) -> Verdict {
    if *policy == Policy::PublicOnly {
        return match session {
            Some(session) if token_is_live(&session.token, now_secs).is_ok() => {
                Verdict::SignedIn(session.user.role.clone())
            }
            _ => Verdict::Render,
        };
    }

    let Some(session) = session else {
        return Verdict::SignIn;
    };
    if let Err(reason) = token_is_live(&session.token, now_secs) {
        return Verdict::Expired(reason);
    }
    if !policy.admits(&session.user.role) {
        return Verdict::Forbidden;
    }
    Verdict::Render
}

/// `Err(None)` means the token decoded but has expired.
fn token_is_live(token: &str, now_secs: i64) -> Result<(), Option<TokenError>> {
    let claims = decode_claims(token).map_err(Some)?;
    if claims.is_expired_at(now_secs) {
        return Err(None);
    }
    Ok(())
}

/// Session-backed guard applied before rendering a route.
pub struct RouteGuard;

impl RouteGuard {
    /// Evaluate `policy` for a navigation to `requested`.
    ///
    /// A dead token clears `store` before redirecting, so a stale user record
    /// never outlives its credential.
    pub fn check<S: KeyValueStore>(
        store: &SessionStore<S>,
        policy: &Policy,
        requested: &str,
        now_secs: i64,
    ) -> Decision {
        let session = store.load();
        match evaluate(policy, session.as_ref(), now_secs) {
            Verdict::Render => Decision::Render,
            Verdict::SignIn => Decision::Redirect { to: LOGIN_PATH.to_owned(), from: Some(requested.to_owned()) },
            Verdict::Expired(reason) => {
                match reason {
                    Some(e) => log::info!("guard: rejecting undecodable token: {e}"),
                    None => log::info!("guard: token expired, signing out"),
                }
                store.clear();
                Decision::redirect(LOGIN_PATH)
            }
            Verdict::Forbidden => Decision::redirect(HOME_PATH),
            Verdict::SignedIn(role) => Decision::redirect(role_home(&role)),
        }
    }
}
