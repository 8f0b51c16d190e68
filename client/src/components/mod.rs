//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read the shared `SessionContext` from Leptos context; pages
//! compose them.

pub mod guarded;
pub mod navbar;
