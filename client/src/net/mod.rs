//! Networking modules for the remote REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` wraps HTTP calls and the bearer header; `types` defines the request
//! and response bodies.

pub mod api;
pub mod types;
