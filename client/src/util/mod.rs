//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Browser-facing helpers (`localStorage`, `Date.now()`, `confirm()`), the
//! navigation rules pages share after login, and claim pickup scheduling.

pub mod auth;
pub mod clock;
pub mod dialog;
pub mod pickup;
pub mod storage;
