//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! `auth` is the reactive view of who is logged in; `session` is the only
//! place that mutates it, always together with the persisted session.
//! `listing` holds the per-page API collections.

pub mod auth;
pub mod listing;
pub mod session;
