//! Top navigation with role-aware links and logout.

#[cfg(test)]
#[path = "navbar_test.rs"]
mod navbar_test;

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::net::types::Role;
use crate::state::session::SessionContext;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavLink {
    pub path: &'static str,
    pub label: &'static str,
}

const fn link(path: &'static str, label: &'static str) -> NavLink {
    NavLink { path, label }
}

const GUEST_LINKS: &[NavLink] = &[link("/", "Home"), link("/available", "Available Food")];
const DONOR_LINKS: &[NavLink] = &[
    link("/", "Home"),
    link("/available", "Available Food"),
    link("/donor", "My Donations"),
    link("/donate", "Donate Food"),
];
const CLAIMANT_LINKS: &[NavLink] =
    &[link("/", "Home"), link("/available", "Available Food"), link("/my-claims", "My Claims")];
const ADMIN_LINKS: &[NavLink] = &[link("/", "Home"), link("/admin", "Dashboard")];

/// Links shown for the signed-in role (`None` for guests).
pub fn nav_links(role: Option<Role>) -> &'static [NavLink] {
    match role {
        None | Some(Role::Unknown(_)) => GUEST_LINKS,
        Some(Role::Donor) => DONOR_LINKS,
        Some(Role::Charity | Role::Individual) => CLAIMANT_LINKS,
        Some(Role::Admin) => ADMIN_LINKS,
    }
}

#[component]
pub fn Navbar() -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let auth = session.auth;
    let navigate = use_navigate();

    let role = move || auth.with(|state| state.role());
    let signed_in = move || auth.with(|state| state.is_signed_in());
    let greeting = move || {
        auth.with(|state| state.user.as_ref().map(|user| format!("Hi, {}", user.display_name())))
            .unwrap_or_default()
    };

    let on_logout = move |_| {
        session.logout();
        navigate("/login", Default::default());
    };

    view! {
        <header class="navbar">
            <nav class="navbar__inner">
                <A href="/" attr:class="navbar__brand">"FoodShare"</A>
                <ul class="navbar__links">
                    {move || {
                        nav_links(role())
                            .iter()
                            .map(|item| view! { <li><A href=item.path>{item.label}</A></li> })
                            .collect_view()
                    }}
                </ul>
                <div class="navbar__account" class:hidden=move || !signed_in()>
                    <span class="navbar__greeting">{greeting}</span>
                    <A href="/profile">"Profile"</A>
                    <button class="navbar__logout" on:click=on_logout>"Logout"</button>
                </div>
                <div class="navbar__account" class:hidden=signed_in>
                    <A href="/login">"Login"</A>
                    <A href="/signup">"Sign up"</A>
                </div>
            </nav>
        </header>
    }
}
