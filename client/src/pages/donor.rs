//! Donor dashboard: the signed-in donor's donations, their claims, and
//! edit/delete actions.

#[cfg(test)]
#[path = "donor_test.rs"]
mod donor_test;

use leptos::prelude::*;
use leptos_router::components::A;

use crate::net::api::ApiClient;
use crate::net::types::{Donation, DonationClaim, DonorStats};
use crate::state::listing::Listing;
use crate::state::session::SessionContext;
use crate::util::clock::format_timestamp;
use crate::util::dialog::confirm;

const LOAD_FAILED: &str = "Failed to load your donations";
const CLAIMS_FAILED: &str = "Failed to load claims";
const DELETE_FAILED: &str = "Failed to delete donation";
const DELETED: &str = "Donation deleted successfully";

fn remaining_text(donation: &Donation) -> String {
    match donation.unclaimed() {
        n if n > 0 => n.to_string(),
        _ => "Fully claimed".to_owned(),
    }
}

fn claimed_text(donation: &Donation) -> String {
    format!("Claimed: {} ({} claims)", donation.total_claimed, donation.claim_count)
}

fn claim_line(claim: &DonationClaim) -> String {
    let when = claim.pickup_time.as_deref().map(format_timestamp).unwrap_or_else(|| "no pickup time".to_owned());
    format!("Claimed {} portions, {when}", claim.quantity)
}

fn edit_href(donation_id: &str) -> String {
    format!("/edit-donation/{}", urlencoding::encode(donation_id))
}

fn load_mine(api: ApiClient, listing: RwSignal<Listing<Donation>>) {
    leptos::task::spawn_local(async move {
        let result = api.my_donations().await;
        listing.update(|l| l.loaded(result, LOAD_FAILED));
    });
}

#[component]
pub fn DonorDashboard() -> impl IntoView {
    let api = StoredValue::new(expect_context::<ApiClient>());
    let auth = expect_context::<SessionContext>().auth;

    let listing = RwSignal::new(Listing::<Donation>::default());
    let claims_for = RwSignal::new(None::<Donation>);
    let claims = RwSignal::new(Listing::<DonationClaim>::default());
    let deleting = RwSignal::new(None::<String>);
    let info = RwSignal::new(String::new());

    load_mine(api.get_value(), listing);

    let name = move || auth.with(|state| state.user.as_ref().map(|u| u.display_name().to_owned()).unwrap_or_default());
    let stats = move || listing.with(|l| DonorStats::from_donations(&l.items));

    let view_claims = move |donation: Donation| {
        let api = api.get_value();
        let id = donation.id.clone();
        claims.set(Listing::default());
        claims_for.set(Some(donation));
        leptos::task::spawn_local(async move {
            let result = api.donation_claims(&id).await;
            claims.update(|l| l.loaded(result, CLAIMS_FAILED));
        });
    };

    let delete = move |donation_id: String| {
        if deleting.get_untracked().is_some() || !confirm("Are you sure you want to delete this donation?") {
            return;
        }
        deleting.set(Some(donation_id.clone()));
        let api = api.get_value();
        leptos::task::spawn_local(async move {
            match api.delete_donation(&donation_id).await {
                Ok(()) => {
                    info.set(DELETED.to_owned());
                    load_mine(api, listing);
                }
                Err(e) => {
                    log::warn!("donor: delete {donation_id} failed: {e}");
                    info.set(e.user_message(DELETE_FAILED));
                }
            }
            deleting.set(None);
        });
    };

    let cards = move || {
        listing
            .get()
            .items
            .into_iter()
            .map(|donation| {
                let id = donation.id.clone();
                let is_deleting = {
                    let id = id.clone();
                    move || deleting.with(|d| d.as_deref() == Some(id.as_str()))
                };
                let href = edit_href(&id);
                let image = match donation.image_url.clone() {
                    Some(src) => view! { <img class="donation-card__image" src=src alt=donation.title.clone()/> }.into_any(),
                    None => view! { <div class="donation-card__image donation-card__image--empty">"No Image"</div> }.into_any(),
                };
                let progress = format!("width: {:.0}%", donation.claimed_percent());
                view! {
                    <article class="donation-card">
                        <header class="donation-card__header">
                            <h3>{donation.title.clone()}</h3>
                            <span class="donation-card__status">{donation.status.clone().unwrap_or_default()}</span>
                        </header>
                        {image}
                        <p>{format!("Total: {}", donation.quantity)}</p>
                        <p>{claimed_text(&donation)}</p>
                        <p>"Remaining: " {remaining_text(&donation)}</p>
                        <div class="progress"><div class="progress__bar" style=progress></div></div>
                        <p class="donation-card__location">{donation.pickup_location.clone().unwrap_or_default()}</p>
                        <div class="donation-card__actions">
                            <button class="btn" on:click={
                                let donation = donation.clone();
                                move |_| view_claims(donation.clone())
                            }>"View Claims"</button>
                            <A href=href attr:class="btn">"Edit"</A>
                            <button
                                class="btn btn--danger"
                                disabled=is_deleting.clone()
                                on:click=move |_| delete(id.clone())
                            >
                                {{ let is_deleting = is_deleting.clone(); move || if is_deleting() { "Deleting..." } else { "Delete" } }}
                            </button>
                        </div>
                    </article>
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
                view! {
                    <li class="claims__row">
                        <p class="claims__who">{claim.charity_name.clone().unwrap_or_default()}</p>
                        <p class="claims__detail">{claim_line(&claim)}</p>
                    </li>
                }
            })
            .collect_view()
    };

    view! {
        <section class="dashboard donor">
            <aside class="dashboard__sidebar">
                <h2>"Donor Panel"</h2>
                <A href="/donate">"Add New Donation"</A>
                <p class="dashboard__greeting">"Logged in as: " {name}</p>
            </aside>
            <div class="dashboard__body">
                <h1>"Welcome, " {name}</h1>
                <div class="stats">
                    <div class="stats__item"><span>"Total Donations"</span><strong>{move || stats().posted}</strong></div>
                    <div class="stats__item"><span>"Total Portions Claimed"</span><strong>{move || stats().claimed}</strong></div>
                    <div class="stats__item"><span>"Remaining Portions"</span><strong>{move || stats().remaining}</strong></div>
                </div>
                <Show when=move || !info.get().is_empty()>
                    <p class="dashboard__message">{move || info.get()}</p>
                </Show>
                <Show when=move || listing.with(|l| l.error.is_some())>
                    <p class="dashboard__error">{move || listing.with(|l| l.error.clone().unwrap_or_default())}</p>
                </Show>
                <Show when=move || !listing.with(|l| l.loading) fallback=|| view! { <p>"Loading..."</p> }>
                    <Show
                        when=move || !listing.with(Listing::is_empty)
                        fallback=|| {
                            view! {
                                <div class="dashboard__empty">
                                    <p>"You haven't added any donations yet."</p>
                                    <A href="/donate" attr:class="btn">"Add Donation"</A>
                                </div>
                            }
                        }
                    >
                        <div class="dashboard__cards">{cards}</div>
                    </Show>
                </Show>
            </div>

            <div class="dialog-backdrop" class:hidden=move || claims_for.with(Option::is_none)>
                <div class="dialog">
                    <h3>"Claims for " {move || claims_for.with(|d| d.as_ref().map(|d| d.title.clone()).unwrap_or_default())}</h3>
                    <Show when=move || claims.with(|l| l.error.is_some())>
                        <p class="dialog__error">{move || claims.with(|l| l.error.clone().unwrap_or_default())}</p>
                    </Show>
                    <Show when=move || !claims.with(|l| l.loading) fallback=|| view! { <p>"Loading..."</p> }>
                        <Show
                            when=move || !claims.with(Listing::is_empty)
                            fallback=|| view! { <p>"No claims for this donation yet."</p> }
                        >
                            <ul class="claims">{claim_rows}</ul>
                        </Show>
                    </Show>
                    <div class="dialog__actions">
                        <button type="button" on:click=move |_| claims_for.set(None)>"Close"</button>
                    </div>
                </div>
            </div>
        </section>
    }
}
