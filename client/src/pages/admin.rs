//! Admin dashboard: every user, donation, and claim, with account toggles
//! and donation removal.
//!
//! Mutations are applied to the loaded lists in place instead of refetching.

#[cfg(test)]
#[path = "admin_test.rs"]
mod admin_test;

use leptos::prelude::*;

use crate::net::api::ApiClient;
use crate::net::types::{ClaimRecord, Donation, UserRecord};
use crate::state::listing::Listing;
use crate::util::clock::format_timestamp;
use crate::util::dialog::confirm;

const LOAD_FAILED: &str = "Failed to load admin data";
const STATUS_FAILED: &str = "Failed to update user status";
const DELETE_FAILED: &str = "Failed to delete donation";

fn status_notice(now_active: bool) -> &'static str {
    if now_active { "User activated" } else { "User deactivated" }
}

fn user_heading(user: &UserRecord) -> String {
    format!("{} ({})", user.display_name(), user.role.as_str())
}

fn donation_meta(donation: &Donation) -> String {
    let location =
        donation.pickup_location.as_deref().filter(|l| !l.trim().is_empty()).unwrap_or("No location");
    format!("{location} • {}", donation.status.as_deref().unwrap_or_default())
}

fn claim_lines(claim: &ClaimRecord) -> (String, String) {
    let title = claim.donation_title.clone().unwrap_or_else(|| "Donation".to_owned());
    let charity = claim.charity_name.clone().unwrap_or_else(|| "Charity".to_owned());
    let when = claim.pickup_time.as_deref().map(format_timestamp).unwrap_or_default();
    (title, format!("{charity} • {when}"))
}

#[component]
pub fn AdminDashboard() -> impl IntoView {
    let api = StoredValue::new(expect_context::<ApiClient>());
    let users = RwSignal::new(Listing::<UserRecord>::default());
    let donations = RwSignal::new(Listing::<Donation>::default());
    let claims = RwSignal::new(Listing::<ClaimRecord>::default());
    let info = RwSignal::new(String::new());

    {
        let client = api.get_value();
        leptos::task::spawn_local(async move {
            let result = client.admin_users().await;
            users.update(|l| l.loaded(result, LOAD_FAILED));
            let result = client.all_donations().await;
            donations.update(|l| l.loaded(result, LOAD_FAILED));
            let result = client.all_claims().await;
            claims.update(|l| l.loaded(result, LOAD_FAILED));
        });
    }

    let toggle_status = move |user_id: String, is_active: bool| {
        let api = api.get_value();
        leptos::task::spawn_local(async move {
            let next = !is_active;
            match api.set_user_status(&user_id, next).await {
                Ok(()) => {
                    users.update(|l| l.update_where(|u| u.id == user_id, |u| u.is_active = next));
                    info.set(status_notice(next).to_owned());
                }
                Err(e) => {
                    log::warn!("admin: status of {user_id} failed: {e}");
                    info.set(e.user_message(STATUS_FAILED));
                }
            }
        });
    };

    let delete_donation = move |donation_id: String| {
        if !confirm("Are you sure you want to delete this donation?") {
            return;
        }
        let api = api.get_value();
        leptos::task::spawn_local(async move {
            match api.delete_donation(&donation_id).await {
                Ok(()) => {
                    donations.update(|l| l.remove_where(|d| d.id == donation_id));
                    info.set("Donation deleted".to_owned());
                }
                Err(e) => {
                    log::warn!("admin: delete {donation_id} failed: {e}");
                    info.set(e.user_message(DELETE_FAILED));
                }
            }
        });
    };

    let user_rows = move || {
        users
            .get()
            .items
            .into_iter()
            .map(|user| {
                let (id, active) = (user.id.clone(), user.is_active);
                view! {
                    <li class="admin__row">
                        <div>
                            <p class="admin__title">{user_heading(&user)}</p>
                            <p class="admin__meta">{user.email.clone()}</p>
                        </div>
                        <button
                            class=if active { "badge badge--active" } else { "badge" }
                            on:click=move |_| toggle_status(id.clone(), active)
                        >
                            {if active { "Active" } else { "Inactive" }}
                        </button>
                    </li>
                }
            })
            .collect_view()
    };

    let donation_rows = move || {
        donations
            .get()
            .items
            .into_iter()
            .map(|donation| {
                let id = donation.id.clone();
                view! {
                    <li class="admin__row">
                        <div>
                            <p class="admin__title">{donation.title.clone()}</p>
                            <p class="admin__meta">{donation_meta(&donation)}</p>
                        </div>
                        <button class="btn btn--danger" on:click=move |_| delete_donation(id.clone())>"Delete"</button>
                    </li>
                }
            })
            .collect_view()
    };

    let claim_rows = move || {
        claims
            .get()
            .items
            .into_iter()
            .map(|claim| {
                let (title, meta) = claim_lines(&claim);
                view! {
                    <li class="admin__row">
                        <p class="admin__title">{title}</p>
                        <p class="admin__meta">{meta}</p>
                    </li>
                }
            })
            .collect_view()
    };

    view! {
        <section class="admin">
            <h2>"Admin Dashboard"</h2>
            <Show when=move || !info.get().is_empty()>
                <p class="admin__message">{move || info.get()}</p>
            </Show>

            <section class="admin__panel">
                <h3>"Users"</h3>
                <AdminList listing=users empty="No users found.">
                    <ul>{user_rows}</ul>
                </AdminList>
            </section>
            <section class="admin__panel">
                <h3>"Donations"</h3>
                <AdminList listing=donations empty="No donations found.">
                    <ul>{donation_rows}</ul>
                </AdminList>
            </section>
            <section class="admin__panel">
                <h3>"Claims"</h3>
                <AdminList listing=claims empty="No claims yet.">
                    <ul>{claim_rows}</ul>
                </AdminList>
            </section>
        </section>
    }
}

/// Loading, error, and empty states around one admin list.
#[component]
fn AdminList<T>(listing: RwSignal<Listing<T>>, empty: &'static str, children: ChildrenFn) -> impl IntoView
where
    T: Send + Sync + 'static,
{
    let placeholder = move || if listing.with(|l| l.loading) { "Loading..." } else { empty };

    view! {
        <Show when=move || listing.with(|l| l.error.is_some())>
            <p class="admin__error">{move || listing.with(|l| l.error.clone().unwrap_or_default())}</p>
        </Show>
        <Show
            when=move || listing.with(|l| !l.loading && !l.items.is_empty())
            fallback=move || view! { <p class="admin__empty">{placeholder}</p> }
        >
            {children()}
        </Show>
    }
}
