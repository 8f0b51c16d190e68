//! Donation create and edit pages sharing one form.
//!
//! SYSTEM CONTEXT
//! ==============
//! `/donate` posts a new [`DonationDraft`]; `/edit-donation/:id` loads the
//! donation, prefills the same fields, and `PUT`s them back. Both return to
//! the donor dashboard on success.

#[cfg(test)]
#[path = "donation_form_test.rs"]
mod donation_form_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::net::api::ApiClient;
use crate::net::types::DonationDraft;

const REQUIRED_FIELDS: &str = "Title and Pickup Location are required!";
const QUANTITY_TOO_LOW: &str = "Quantity must be at least 1";
const ADD_FAILED: &str = "Failed to add donation";
const LOAD_FAILED: &str = "Failed to load donation";
const UPDATE_FAILED: &str = "Update failed";
const DONOR_HOME: &str = "/donor";

const FOOD_TYPES: [(&str, &str); 2] = [("veg", "Vegetarian"), ("non-veg", "Non-Vegetarian")];
const CATEGORIES: [(&str, &str); 6] = [
    ("", "Select a Category"),
    ("Bakery", "Bakery"),
    ("Fruits", "Fruits"),
    ("Vegetables", "Vegetables"),
    ("Cooked", "Cooked Food"),
    ("Packaged", "Packaged Food"),
];

/// Check required fields and normalise the draft for sending.
fn validate_donation(draft: &DonationDraft) -> Result<DonationDraft, &'static str> {
    let title = draft.title.trim();
    let pickup_location = draft.pickup_location.trim();
    if title.is_empty() || pickup_location.is_empty() {
        return Err(REQUIRED_FIELDS);
    }
    if draft.quantity < 1 {
        return Err(QUANTITY_TOO_LOW);
    }
    Ok(DonationDraft {
        title: title.to_owned(),
        pickup_location: pickup_location.to_owned(),
        expires_at: draft.expires_at.as_deref().map(str::trim).filter(|at| !at.is_empty()).map(str::to_owned),
        ..draft.clone()
    })
}

/// Value for the `<input type="date">`: the date part of a stored expiry.
fn expiry_input_value(expires_at: Option<&str>) -> String {
    expires_at.map(str::trim).and_then(|at| at.get(..10)).unwrap_or_default().to_owned()
}

fn parse_quantity(raw: &str) -> i64 {
    raw.trim().parse().unwrap_or(0)
}

fn select_options(choices: &'static [(&'static str, &'static str)]) -> impl IntoView {
    choices.iter().map(|&(value, label)| view! { <option value=value>{label}</option> }).collect_view()
}

#[component]
fn DonationFields(form: RwSignal<DonationDraft>) -> impl IntoView {
    view! {
        <label>
            "Donation Title"
            <input
                type="text"
                placeholder="e.g. Fresh Vegetables"
                prop:value=move || form.with(|f| f.title.clone())
                on:input=move |ev| form.update(|f| f.title = event_target_value(&ev))
            />
        </label>
        <label>
            "Description"
            <textarea
                prop:value=move || form.with(|f| f.description.clone())
                on:input=move |ev| form.update(|f| f.description = event_target_value(&ev))
            ></textarea>
        </label>
        <label>
            "Food Type"
            <select
                prop:value=move || form.with(|f| f.food_type.clone())
                on:change=move |ev| form.update(|f| f.food_type = event_target_value(&ev))
            >
                {select_options(&FOOD_TYPES)}
            </select>
        </label>
        <label>
            "Category"
            <select
                prop:value=move || form.with(|f| f.category.clone())
                on:change=move |ev| form.update(|f| f.category = event_target_value(&ev))
            >
                {select_options(&CATEGORIES)}
            </select>
        </label>
        <label>
            "Quantity"
            <input
                type="number"
                min="1"
                prop:value=move || form.with(|f| f.quantity.to_string())
                on:input=move |ev| form.update(|f| f.quantity = parse_quantity(&event_target_value(&ev)))
            />
        </label>
        <label>
            "Unit"
            <input
                type="text"
                placeholder="e.g. kg, boxes, pieces"
                prop:value=move || form.with(|f| f.unit.clone())
                on:input=move |ev| form.update(|f| f.unit = event_target_value(&ev))
            />
        </label>
        <label>
            "Pickup Location"
            <input
                type="text"
                placeholder="e.g. Helsinki Central Market"
                prop:value=move || form.with(|f| f.pickup_location.clone())
                on:input=move |ev| form.update(|f| f.pickup_location = event_target_value(&ev))
            />
        </label>
        <label>
            "Expiry Date (optional)"
            <input
                type="date"
                prop:value=move || form.with(|f| expiry_input_value(f.expires_at.as_deref()))
                on:input=move |ev| form.update(|f| f.expires_at = Some(event_target_value(&ev)))
            />
        </label>
        <label>
            "Image URL (optional)"
            <input
                type="url"
                placeholder="https://example.com/food.jpg"
                prop:value=move || form.with(|f| f.image_url.clone())
                on:input=move |ev| form.update(|f| f.image_url = event_target_value(&ev))
            />
        </label>
        <label>
            "Pickup Instructions (optional)"
            <textarea
                prop:value=move || form.with(|f| f.pickup_instructions.clone())
                on:input=move |ev| form.update(|f| f.pickup_instructions = event_target_value(&ev))
            ></textarea>
        </label>
    }
}

#[component]
pub fn AddDonationPage() -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let navigate = use_navigate();
    let form = RwSignal::new(DonationDraft::default());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let draft = match form.with_untracked(validate_donation) {
            Ok(draft) => draft,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        busy.set(true);
        let (api, navigate) = (api.clone(), navigate.clone());
        leptos::task::spawn_local(async move {
            match api.create_donation(&draft).await {
                Ok(()) => navigate(DONOR_HOME, NavigateOptions::default()),
                Err(e) => {
                    log::warn!("donate: create failed: {e}");
                    info.set(e.user_message(ADD_FAILED));
                }
            }
            busy.set(false);
        });
    };

    view! {
        <section class="donation-form">
            <h2>"Add New Food Donation"</h2>
            <form on:submit=on_submit>
                <DonationFields form=form/>
                <p class="donation-form__message">{move || info.get()}</p>
                <button type="submit" disabled=move || busy.get()>
                    {move || if busy.get() { "Adding..." } else { "Add Donation" }}
                </button>
            </form>
        </section>
    }
}

#[component]
pub fn EditDonationPage() -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let navigate = use_navigate();
    let params = use_params_map();
    let donation_id = params.with_untracked(|p| p.get("id")).unwrap_or_default();

    let form = RwSignal::new(DonationDraft::default());
    let loading = RwSignal::new(true);
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    {
        let (api, navigate, id) = (api.clone(), navigate.clone(), donation_id.clone());
        leptos::task::spawn_local(async move {
            match api.donation(&id).await {
                Ok(donation) => {
                    form.set(DonationDraft::from_donation(&donation));
                    loading.set(false);
                }
                Err(e) => {
                    log::warn!("edit-donation: load {id} failed: {e}");
                    info.set(e.user_message(LOAD_FAILED));
                    navigate(DONOR_HOME, NavigateOptions::default());
                }
            }
        });
    }

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() || loading.get() {
            return;
        }
        let draft = match form.with_untracked(validate_donation) {
            Ok(draft) => draft,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        busy.set(true);
        let (api, navigate, id) = (api.clone(), navigate.clone(), donation_id.clone());
        leptos::task::spawn_local(async move {
            match api.update_donation(&id, &draft).await {
                Ok(()) => navigate(DONOR_HOME, NavigateOptions::default()),
                Err(e) => {
                    log::warn!("edit-donation: update {id} failed: {e}");
                    info.set(e.user_message(UPDATE_FAILED));
                }
            }
            busy.set(false);
        });
    };

    view! {
        <section class="donation-form">
            <h2>"Edit Donation"</h2>
            <p class:hidden=move || !loading.get()>"Loading..."</p>
            <form class:hidden=move || loading.get() on:submit=on_submit>
                <DonationFields form=form/>
                <p class="donation-form__message">{move || info.get()}</p>
                <button type="submit" disabled=move || busy.get()>"Save Changes"</button>
            </form>
        </section>
    }
}
