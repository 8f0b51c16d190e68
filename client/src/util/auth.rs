//! Shared auth navigation helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route guards, login, and signup must agree on where a visitor ends up, so
//! the path rules live here rather than in each page.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos_router::NavigateOptions;
use session::role_home;

use crate::net::types::Role;

/// Guard redirects replace the history entry so "back" skips them.
pub fn replace_options() -> NavigateOptions {
    NavigateOptions { replace: true, ..NavigateOptions::default() }
}

/// Location string (`path?query`) handed to the guard as `requested`.
pub fn requested_location(pathname: &str, search: &str) -> String {
    let search = search.trim_start_matches('?');
    if search.is_empty() { pathname.to_owned() } else { format!("{pathname}?{search}") }
}

/// Where to send a user right after login or signup.
///
/// Honors the `from` location the guard recorded when it is a local path
/// outside the public-only pages, else falls back to the role home.
pub fn post_login_target(from: Option<&str>, role: &Role) -> String {
    from.filter(|from| is_safe_return_path(from))
        .map_or_else(|| role_home(role).to_owned(), str::to_owned)
}

fn is_safe_return_path(path: &str) -> bool {
    if !path.starts_with('/') || path.starts_with("//") || path.contains('\\') {
        return false;
    }
    let route = path.split(['?', '#']).next().unwrap_or_default();
    !matches!(route, "/login" | "/signup")
}
