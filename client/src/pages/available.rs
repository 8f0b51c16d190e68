//! Public listing of open donations with the claim dialog.
//!
//! SYSTEM CONTEXT
//! ==============
//! Reachable without a session; claiming needs one. A claim is validated
//! locally (quantity bounds, pickup window) before `POST /claims`, and the
//! list is refetched afterwards so remaining quantities stay current.

#[cfg(test)]
#[path = "available_test.rs"]
mod available_test;

use chrono::{DateTime, Utc};
use leptos::prelude::*;

use crate::net::api::ApiClient;
use crate::net::types::{ClaimRequest, Donation};
use crate::state::auth::AuthState;
use crate::state::listing::Listing;
use crate::state::session::SessionContext;
use crate::util::clock::{format_timestamp, to_wire};
use crate::util::pickup::{Meridiem, PickupError, PickupForm, check_pickup_window};

pub(crate) const NO_IMAGE: &str = "/no-image.jpg";
const LOAD_FAILED: &str = "Failed to load available food donations";
const LOGIN_TO_CLAIM: &str = "Please log in to claim food";
const CLAIM_FAILED: &str = "Failed to claim donation";
const CLAIMED: &str = "Food claimed successfully!";

/// Quantity typed into the claim dialog, kept within `1..=max`.
fn clamp_claim_quantity(raw: &str, max: i64) -> i64 {
    raw.trim().parse::<i64>().unwrap_or(1).min(max).max(1)
}

fn remaining_label(donation: &Donation) -> String {
    format!("{} {} left", donation.available(), donation.unit_label())
}

/// Build the claim body once the pickup instant passes the window rules.
fn claim_request(
    donation: &Donation,
    quantity: i64,
    pickup: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<ClaimRequest, PickupError> {
    check_pickup_window(pickup, now, donation.expires_at.as_deref())?;
    Ok(ClaimRequest {
        donation_id: donation.id.clone(),
        quantity: quantity.min(donation.available()).max(1),
        pickup_time: to_wire(pickup),
    })
}

fn load_available(api: ApiClient, listing: RwSignal<Listing<Donation>>) {
    leptos::task::spawn_local(async move {
        let result = api.available_donations().await;
        listing.update(|l| l.loaded(result, LOAD_FAILED));
    });
}

#[component]
pub fn AvailableFoodPage() -> impl IntoView {
    let api = StoredValue::new(expect_context::<ApiClient>());
    let auth = expect_context::<SessionContext>().auth;

    let listing = RwSignal::new(Listing::<Donation>::default());
    let selected = RwSignal::new(None::<Donation>);
    let quantity = RwSignal::new(1_i64);
    let pickup = RwSignal::new(PickupForm::default());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    load_available(api.get_value(), listing);

    let open_claim = move |donation: Donation| {
        quantity.set(1);
        pickup.set(PickupForm::default());
        info.set(String::new());
        selected.set(Some(donation));
    };
    let on_close = move |_| selected.set(None);

    let on_confirm = move |_| {
        if busy.get() {
            return;
        }
        if !auth.with_untracked(AuthState::is_signed_in) {
            info.set(LOGIN_TO_CLAIM.to_owned());
            return;
        }
        let Some(donation) = selected.get_untracked() else {
            return;
        };
        let req = match pickup
            .with_untracked(PickupForm::instant)
            .and_then(|at| claim_request(&donation, quantity.get_untracked(), at, Utc::now()))
        {
            Ok(req) => req,
            Err(e) => {
                info.set(e.to_string());
                return;
            }
        };
        busy.set(true);
        let api = api.get_value();
        leptos::task::spawn_local(async move {
            match api.create_claim(&req).await {
                Ok(()) => {
                    info.set(CLAIMED.to_owned());
                    selected.set(None);
                    load_available(api, listing);
                }
                Err(e) => {
                    log::warn!("available: claim on {} failed: {e}", req.donation_id);
                    info.set(e.user_message(CLAIM_FAILED));
                }
            }
            busy.set(false);
        });
    };

    let cards = move || {
        listing
            .get()
            .items
            .into_iter()
            .map(|donation| {
                let image = donation.image_url.clone().unwrap_or_else(|| NO_IMAGE.to_owned());
                let remaining = remaining_label(&donation);
                let location =
                    donation.pickup_location.clone().unwrap_or_else(|| "Location not specified".to_owned());
                let expires = donation.expires_at.as_deref().map(format_timestamp);
                let tags = [donation.food_type.clone(), donation.category.clone()]
                    .into_iter()
                    .flatten()
                    .map(|tag| view! { <span class="tag">{tag}</span> })
                    .collect_view();
                view! {
                    <article class="donation-card">
                        <img class="donation-card__image" src=image alt=donation.title.clone()/>
                        <h3>{donation.title.clone()}</h3>
                        <p class="donation-card__description">
                            {donation.description.clone().unwrap_or_else(|| "No description".to_owned())}
                        </p>
                        <div class="donation-card__tags">{tags}</div>
                        <p class="donation-card__remaining">{remaining}</p>
                        <p class="donation-card__location">{location}</p>
                        {expires.map(|at| view! { <p class="donation-card__expiry">"Expires: " {at}</p> })}
                        <button class="btn" on:click=move |_| open_claim(donation.clone())>
                            "View Details & Claim"
                        </button>
                    </article>
                }
            })
            .collect_view()
    };

    let details = move || {
        selected.get().map(|donation| {
            let instructions = donation.pickup_instructions.clone().filter(|text| !text.trim().is_empty());
            view! {
                <h3>{donation.title.clone()}</h3>
                <img
                    class="dialog__image"
                    src=donation.image_url.clone().unwrap_or_else(|| NO_IMAGE.to_owned())
                    alt=donation.title.clone()
                />
                <p>{donation.description.clone().unwrap_or_else(|| "No description".to_owned())}</p>
                <p>{format!("{} {} remaining", donation.available(), donation.unit_label())}</p>
                <p>{donation.pickup_location.clone().unwrap_or_default()}</p>
                {instructions.map(|text| view! { <p class="dialog__note">"Instructions: " {text}</p> })}
            }
        })
    };
    let max_quantity = move || selected.with(|d| d.as_ref().map_or(1, Donation::available));

    view! {
        <section class="available">
            <h2>"Available Food Donations"</h2>
            <Show when=move || !info.get().is_empty()>
                <p class="available__message">{move || info.get()}</p>
            </Show>
            <Show when=move || listing.with(|l| l.error.is_some())>
                <p class="available__error">{move || listing.with(|l| l.error.clone().unwrap_or_default())}</p>
            </Show>
            <Show when=move || !listing.with(|l| l.loading) fallback=|| view! { <p>"Loading..."</p> }>
                <Show
                    when=move || !listing.with(Listing::is_empty)
                    fallback=|| view! { <p class="available__empty">"No donations available right now."</p> }
                >
                    <div class="available__grid">{cards}</div>
                </Show>
            </Show>

            <div class="dialog-backdrop" class:hidden=move || selected.with(Option::is_none)>
                <div class="dialog">
                    {details}
                    <label>
                        "Quantity to claim"
                        <input
                            type="number"
                            min="1"
                            max=move || max_quantity().to_string()
                            prop:value=move || quantity.get().to_string()
                            on:input=move |ev| {
                                quantity.set(clamp_claim_quantity(&event_target_value(&ev), max_quantity()));
                            }
                        />
                    </label>
                    <fieldset class="pickup">
                        <legend>"Schedule Pickup"</legend>
                        <input
                            type="date"
                            prop:value=move || pickup.with(|p| p.date.clone())
                            on:input=move |ev| pickup.update(|p| p.date = event_target_value(&ev))
                        />
                        <select
                            prop:value=move || pickup.with(|p| p.hour.clone())
                            on:change=move |ev| pickup.update(|p| p.hour = event_target_value(&ev))
                        >
                            {(1..=12).map(|h| view! { <option value=h.to_string()>{h}</option> }).collect_view()}
                        </select>
                        <input
                            type="number"
                            min="0"
                            max="59"
                            prop:value=move || pickup.with(|p| p.minute.clone())
                            on:input=move |ev| {
                                let raw: String = event_target_value(&ev).chars().take(2).collect();
                                pickup.update(|p| p.minute = raw);
                            }
                        />
                        <select
                            prop:value=move || pickup.with(|p| p.meridiem.label())
                            on:change=move |ev| pickup.update(|p| p.meridiem = Meridiem::from_label(&event_target_value(&ev)))
                        >
                            <option value="AM">"AM"</option>
                            <option value="PM">"PM"</option>
                        </select>
                    </fieldset>
                    <div class="dialog__actions">
                        <button type="button" on:click=on_close>"Cancel"</button>
                        <button type="button" on:click=on_confirm disabled=move || busy.get()>"Confirm Claim"</button>
                    </div>
                </div>
            </div>
        </section>
    }
}
