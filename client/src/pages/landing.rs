//! Landing page with a role-aware call to action.

#[cfg(test)]
#[path = "landing_test.rs"]
mod landing_test;

use leptos::prelude::*;
use leptos_router::components::A;

use crate::net::types::Role;
use crate::state::session::SessionContext;

/// Primary call-to-action on the landing page for each visitor kind.
fn landing_cta(role: Option<&Role>) -> (&'static str, &'static str) {
    match role {
        None | Some(Role::Unknown(_)) => ("/signup", "Join FoodShare"),
        Some(Role::Donor) => ("/donate", "Donate Food"),
        Some(Role::Charity | Role::Individual) => ("/available", "Find Food"),
        Some(Role::Admin) => ("/admin", "Open Dashboard"),
    }
}

#[component]
pub fn LandingPage() -> impl IntoView {
    let auth = expect_context::<SessionContext>().auth;
    let cta = move || auth.with(|state| landing_cta(state.user.as_ref().map(|user| &user.role)));

    view! {
        <section class="landing">
            <h1>"Share surplus food, feed your community"</h1>
            <p>"Donors post what they have left; charities and neighbours claim it before it goes to waste."</p>
            {move || {
                let (href, label) = cta();
                view! { <A href=href attr:class="landing__cta">{label}</A> }
            }}
            <A href="/available" attr:class="landing__browse">"Browse available food"</A>
        </section>
    }
}
