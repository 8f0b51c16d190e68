//! Persisted auth session: the single source of truth for who is logged in.
//!
//! DESIGN
//! ======
//! The user record and token are written as one JSON entry under
//! [`SESSION_KEY`], so an interrupted write can never leave half a session
//! behind. Older builds stored them as two independent keys (`user`,
//! `token`); those are read once and migrated.
//!
//! ERROR HANDLING
//! ==============
//! Internals return [`SessionError`]; the public operations log and swallow
//! it. Any unreadable state is indistinguishable from "nobody logged in",
//! and is wiped so the next load starts clean.
//!
//! The store also owns the outgoing `Authorization` header so request code
//! can never disagree with what is persisted.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::sync::{Arc, PoisonError, RwLock};

use crate::storage::{KeyValueStore, StorageError};
use crate::types::{Session, UserRecord};

/// Storage key of the atomic session record.
pub const SESSION_KEY: &str = "session";
/// Legacy key holding the JSON user record.
pub const LEGACY_USER_KEY: &str = "user";
/// Legacy key holding the raw token.
pub const LEGACY_TOKEN_KEY: &str = "token";

/// Why persisted state could not become a session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("malformed session record: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("session record has an empty token")]
    EmptyToken,
    #[error("legacy session has {present:?} but not its pair")]
    HalfSession { present: &'static str },
}

/// Shared `Authorization` header value for outgoing API requests.
///
/// Cloned into the HTTP client; the session store is the only writer.
#[derive(Clone, Debug, Default)]
pub struct AuthHeader {
    bearer: Arc<RwLock<Option<String>>>,
}

impl AuthHeader {
    /// Full header value, e.g. `Bearer abc.def.ghi`.
    #[must_use]
    pub fn value(&self) -> Option<String> {
        self.bearer.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn set_token(&self, token: &str) {
        *self.bearer.write().unwrap_or_else(PoisonError::into_inner) = Some(format!("Bearer {token}"));
    }

    fn clear(&self) {
        *self.bearer.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// Reads and writes the persisted [`Session`].
#[derive(Clone, Debug)]
pub struct SessionStore<S> {
    storage: S,
    auth: AuthHeader,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(storage: S, auth: AuthHeader) -> Self {
        Self { storage, auth }
    }

    /// Handle to the header this store keeps in sync.
    pub fn auth_header(&self) -> &AuthHeader {
        &self.auth
    }

    /// Read the persisted session.
    ///
    /// Returns `None` for missing, partial, or malformed state, clearing
    /// whatever was left so a later load cannot resurrect it.
    pub fn load(&self) -> Option<Session> {
        match self.read() {
            Ok(Some(session)) => {
                self.auth.set_token(&session.token);
                Some(session)
            }
            Ok(None) => {
                self.auth.clear();
                None
            }
            Err(SessionError::Storage(e)) => {
                log::warn!("session: storage read failed: {e}");
                self.auth.clear();
                None
            }
            Err(e) => {
                log::warn!("session: discarding stored session: {e}");
                self.clear();
                None
            }
        }
    }

    /// Persist `user` and `token` as the current session.
    ///
    /// Best-effort: a failed write is logged and the previous state is kept.
    pub fn save(&self, user: &UserRecord, token: &str) {
        if let Err(e) = self.try_save(user, token) {
            log::error!("session: failed to save session for user {}: {e}", user.id);
        }
    }

    /// [`SessionStore::save`] for callers that must react to a failed write.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] when the token is empty or storage refuses
    /// the write. Storage and the header are then left as they were.
    pub fn try_save(&self, user: &UserRecord, token: &str) -> Result<(), SessionError> {
        let session = Session { user: user.clone(), token: token.to_owned() };
        self.write(&session)?;
        self.auth.set_token(token);
        self.remove_legacy();
        Ok(())
    }

    /// Forget the session and drop the request header.
    pub fn clear(&self) {
        for key in [SESSION_KEY, LEGACY_USER_KEY, LEGACY_TOKEN_KEY] {
            if let Err(e) = self.storage.remove(key) {
                log::warn!("session: failed to remove {key:?}: {e}");
            }
        }
        self.auth.clear();
    }

    /// Replace the user half of the current session, keeping its token.
    ///
    /// Returns `false` when nobody is logged in or the write failed.
    pub fn update_user(&self, user: &UserRecord) -> bool {
        let Some(current) = self.load() else {
            return false;
        };
        match self.try_save(user, &current.token) {
            Ok(()) => true,
            Err(e) => {
                log::error!("session: failed to update user {}: {e}", user.id);
                false
            }
        }
    }

    fn read(&self) -> Result<Option<Session>, SessionError> {
        if let Some(raw) = self.storage.get(SESSION_KEY)? {
            let session: Session = serde_json::from_str(&raw)?;
            validate(&session)?;
            return Ok(Some(session));
        }
        self.read_legacy()
    }

    fn read_legacy(&self) -> Result<Option<Session>, SessionError> {
        let user = self.storage.get(LEGACY_USER_KEY)?;
        let token = self.storage.get(LEGACY_TOKEN_KEY)?;
        let (user, token) = match (user, token) {
            (None, None) => return Ok(None),
            (Some(user), Some(token)) => (user, token),
            (Some(_), None) => return Err(SessionError::HalfSession { present: LEGACY_USER_KEY }),
            (None, Some(_)) => return Err(SessionError::HalfSession { present: LEGACY_TOKEN_KEY }),
        };
        let session = Session { user: serde_json::from_str(&user)?, token };
        validate(&session)?;

        log::info!("session: migrating legacy session for user {}", session.user.id);
        match self.write(&session) {
            Ok(()) => self.remove_legacy(),
            Err(e) => log::warn!("session: legacy migration deferred: {e}"),
        }
        Ok(Some(session))
    }

    fn write(&self, session: &Session) -> Result<(), SessionError> {
        validate(session)?;
        let raw = serde_json::to_string(session)?;
        self.storage.set(SESSION_KEY, &raw)?;
        Ok(())
    }

    fn remove_legacy(&self) {
        for key in [LEGACY_USER_KEY, LEGACY_TOKEN_KEY] {
            if let Err(e) = self.storage.remove(key) {
                log::warn!("session: failed to remove legacy {key:?}: {e}");
            }
        }
    }
}

fn validate(session: &Session) -> Result<(), SessionError> {
    if session.token.trim().is_empty() {
        return Err(SessionError::EmptyToken);
    }
    Ok(())
}
