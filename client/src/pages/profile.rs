//! Profile page: shows the signed-in user and edits contact details.
//!
//! SYSTEM CONTEXT
//! ==============
//! The only flow that changes just the user half of the session: the server
//! echoes the updated fields, which are merged over the stored record and
//! persisted through `SessionContext::update_user`.

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use leptos::prelude::*;

use crate::net::api::ApiClient;
use crate::net::types::{ProfileUpdate, UserRecord};
use crate::state::session::SessionContext;

/// The server accepted the edit but the browser copy could not be updated.
const LOCAL_SAVE_FAILED: &str = "Profile saved, but this browser could not store it. Log in again to refresh.";

/// Label/value pairs for the read-only profile card.
fn profile_rows(user: &UserRecord) -> Vec<(&'static str, String)> {
    let or_not_set = |value: Option<&String>| value.filter(|v| !v.is_empty()).cloned().unwrap_or_else(|| "Not set".to_owned());
    vec![
        ("Name", user.display_name().to_owned()),
        ("Email", user.email.clone()),
        ("Role", user.role.as_str().to_owned()),
        ("Phone", or_not_set(user.phone.as_ref())),
        ("Organization", or_not_set(user.organization_name.as_ref())),
        ("Status", if user.is_active { "Active" } else { "Suspended" }.to_owned()),
    ]
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let api = expect_context::<ApiClient>();
    let auth = session.auth;

    let show_edit = RwSignal::new(false);
    let form = RwSignal::new(ProfileUpdate::default());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_edit = move |_| {
        if let Some(user) = auth.get_untracked().user {
            form.set(ProfileUpdate::from_user(&user));
        }
        info.set(String::new());
        show_edit.set(true);
    };
    let on_cancel = move |_| show_edit.set(false);

    let on_save = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let Some(user) = auth.get_untracked().user else {
            return;
        };
        let update = form.get_untracked();
        busy.set(true);
        let (api, session) = (api.clone(), session.clone());
        leptos::task::spawn_local(async move {
            match api.update_user(&user.id, &update).await {
                Ok(patch) => match user.merged_with(&patch) {
                    Ok(merged) => {
                        if session.update_user(&merged) {
                            show_edit.set(false);
                            info.set("Profile updated!".to_owned());
                        } else {
                            info.set(LOCAL_SAVE_FAILED.to_owned());
                        }
                    }
                    Err(e) => {
                        log::warn!("profile: server returned unusable user: {e}");
                        info.set("Error updating profile".to_owned());
                    }
                },
                Err(e) => info.set(e.user_message("Error updating profile")),
            }
            busy.set(false);
        });
    };

    let rows = move || {
        auth.with(|state| state.user.as_ref().map(profile_rows).unwrap_or_default())
            .into_iter()
            .map(|(label, value)| {
                view! {
                    <div class="profile__row">
                        <span class="profile__label">{label}</span>
                        <span class="profile__value">{value}</span>
                    </div>
                }
            })
            .collect_view()
    };

    view! {
        <section class="profile">
            <h2>"My Profile"</h2>
            <div class="profile__card">{rows}</div>
            <button class="profile__edit" on:click=on_edit>"Edit Profile"</button>
            <Show when=move || !info.get().is_empty()>
                <p class="profile__message">{move || info.get()}</p>
            </Show>
            <div class="dialog-backdrop" class:hidden=move || !show_edit.get()>
                <form class="dialog" on:submit=on_save>
                    <h3>"Edit Profile"</h3>
                    <input
                        type="text"
                        placeholder="Full Name"
                        prop:value=move || form.with(|f| f.full_name.clone())
                        on:input=move |ev| form.update(|f| f.full_name = event_target_value(&ev))
                    />
                    <input
                        type="tel"
                        placeholder="Phone"
                        prop:value=move || form.with(|f| f.phone.clone())
                        on:input=move |ev| form.update(|f| f.phone = event_target_value(&ev))
                    />
                    <input
                        type="text"
                        placeholder="Organization"
                        prop:value=move || form.with(|f| f.organization_name.clone())
                        on:input=move |ev| form.update(|f| f.organization_name = event_target_value(&ev))
                    />
                    <div class="dialog__actions">
                        <button type="button" on:click=on_cancel>"Cancel"</button>
                        <button type="submit" disabled=move || busy.get()>"Save"</button>
                    </div>
                </form>
            </div>
        </section>
    }
}
