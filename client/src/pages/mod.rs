//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (form state, API calls, post-
//! submit navigation). Access control is applied around pages by
//! `components::guarded`, never inside them.

pub mod admin;
pub mod available;
pub mod claims;
pub mod donation_form;
pub mod donor;
pub mod landing;
pub mod login;
pub mod password;
pub mod profile;
pub mod signup;
