//! The claimant's own claims with cancel.

#[cfg(test)]
#[path = "claims_test.rs"]
mod claims_test;

use leptos::prelude::*;
use leptos_router::components::A;

use crate::net::api::ApiClient;
use crate::net::types::{DEFAULT_UNIT, MyClaim};
use crate::state::listing::Listing;
use crate::util::clock::format_timestamp;
use crate::util::dialog::confirm;

const LOAD_FAILED: &str = "Failed to load your claims";
const CANCEL_FAILED: &str = "Failed to cancel claim";
const CANCELLED: &str = "Claim cancelled";

/// Badge modifier for a claim status.
fn claim_status_class(status: &str) -> &'static str {
    match status {
        "reserved" => "badge badge--reserved",
        "picked_up" => "badge badge--picked-up",
        _ => "badge",
    }
}

fn claimed_summary(claim: &MyClaim) -> String {
    let unit = claim.unit.as_deref().filter(|unit| !unit.trim().is_empty()).unwrap_or(DEFAULT_UNIT);
    format!("Claimed: {} {unit}", claim.claimed_quantity)
}

fn load_claims(api: ApiClient, listing: RwSignal<Listing<MyClaim>>) {
    leptos::task::spawn_local(async move {
        let result = api.my_claims().await;
        listing.update(|l| l.loaded(result, LOAD_FAILED));
    });
}

#[component]
pub fn MyClaimsPage() -> impl IntoView {
    let api = StoredValue::new(expect_context::<ApiClient>());
    let listing = RwSignal::new(Listing::<MyClaim>::default());
    let cancelling = RwSignal::new(None::<String>);
    let info = RwSignal::new(String::new());

    load_claims(api.get_value(), listing);

    let cancel = move |claim_id: String| {
        if cancelling.get_untracked().is_some() || !confirm("Cancel this claim?") {
            return;
        }
        cancelling.set(Some(claim_id.clone()));
        let api = api.get_value();
        leptos::task::spawn_local(async move {
            match api.cancel_claim(&claim_id).await {
                Ok(()) => {
                    info.set(CANCELLED.to_owned());
                    load_claims(api, listing);
                }
                Err(e) => {
                    log::warn!("claims: cancel {claim_id} failed: {e}");
                    info.set(e.user_message(CANCEL_FAILED));
                }
            }
            cancelling.set(None);
        });
    };

    let cards = move || {
        listing
            .get()
            .items
            .into_iter()
            .map(|claim| {
                let id = claim.claim_id.clone();
                let is_cancelling = {
                    let id = id.clone();
                    move || cancelling.with(|c| c.as_deref() == Some(id.as_str()))
                };
                let title = claim.donation_title.clone().unwrap_or_default();
                let image = match claim.donation_image.clone() {
                    Some(src) => view! { <img class="claim-card__image" src=src alt=title.clone()/> }.into_any(),
                    None => view! { <div class="claim-card__image claim-card__image--empty">"No Image"</div> }.into_any(),
                };
                let pickup = claim.pickup_time.as_deref().map(format_timestamp).unwrap_or_default();
                view! {
                    <article class="claim-card">
                        {image}
                        <h3>{title}</h3>
                        <p>{claim.donation_description.clone().unwrap_or_default()}</p>
                        <p>{claimed_summary(&claim)}</p>
                        <p>{format!("Total portions: {}", claim.total_quantity)}</p>
                        <p class="claim-card__location">{claim.pickup_location.clone().unwrap_or_default()}</p>
                        <p>"Pickup: " {pickup}</p>
                        <span class=claim_status_class(&claim.claim_status)>{claim.claim_status.clone()}</span>
                        <footer class="claim-card__footer">
                            <span>"Donor: " {claim.donor_name.clone().unwrap_or_default()}</span>
                            <button
                                class="btn btn--danger"
                                disabled=is_cancelling.clone()
                                on:click=move |_| cancel(id.clone())
                            >
                                {{ let is_cancelling = is_cancelling.clone(); move || if is_cancelling() { "Cancelling..." } else { "Cancel" } }}
                            </button>
                        </footer>
                    </article>
                }
            })
            .collect_view()
    };

    view! {
        <section class="claims-page">
            <h2>"My Claims"</h2>
            <Show when=move || !info.get().is_empty()>
                <p class="claims-page__message">{move || info.get()}</p>
            </Show>
            <Show when=move || listing.with(|l| l.error.is_some())>
                <p class="claims-page__error">{move || listing.with(|l| l.error.clone().unwrap_or_default())}</p>
            </Show>
            <Show when=move || !listing.with(|l| l.loading) fallback=|| view! { <p>"Loading..."</p> }>
                <Show
                    when=move || !listing.with(Listing::is_empty)
                    fallback=|| {
                        view! {
                            <div class="claims-page__empty">
                                <p>"You haven't claimed any food yet."</p>
                                <p>"Browse available food near you."</p>
                                <A href="/available" attr:class="btn">"Browse Food"</A>
                            </div>
                        }
                    }
                >
                    <div class="claims-page__grid">{cards}</div>
                </Show>
            </Show>
        </section>
    }
}
