//! Session persistence and route access control for the FoodShare client.
//!
//! This crate owns the authenticated-user model shared by every page of the
//! `client` app. It is deliberately free of browser dependencies so the
//! guard/session rules can be exercised with plain `cargo test`.
//!
//! - [`types`]: typed user record, roles, and the `{ user, token }` session.
//! - [`token`]: bearer-token payload decoding and expiry checks.
//! - [`storage`]: the synchronous key-value seam plus an in-memory backend.
//! - [`store`]: load/save/clear of the persisted session.
//! - [`guard`]: per-navigation access decisions.

pub mod guard;
pub mod storage;
pub mod store;
pub mod token;
pub mod types;

#[cfg(test)]
mod test_support;

pub use guard::{Decision, Policy, RouteGuard, Verdict, evaluate, role_home};
pub use storage::{KeyValueStore, MemoryStore, StorageError};
pub use store::{AuthHeader, SessionError, SessionStore};
pub use token::{Claims, TokenError, decode_claims};
pub use types::{AuthResponse, Role, Session, UserRecord};
