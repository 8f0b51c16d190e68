//! Signup page: creates an account via `POST /users/signup` and signs in.

#[cfg(test)]
#[path = "signup_test.rs"]
mod signup_test;

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::net::api::ApiClient;
use crate::net::types::{Role, SignupRequest};
use crate::state::session::{SAVE_FAILED, SessionContext};
use crate::util::auth::post_login_target;

pub const MIN_PASSWORD_LEN: usize = 6;
const SIGNUP_FAILED: &str = "Signup failed";

/// Roles a visitor may pick for themselves; admins are provisioned server-side.
pub const SELF_SERVICE_ROLES: [Role; 3] = [Role::Individual, Role::Charity, Role::Donor];

/// Raw form values as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub role: String,
    pub organization_name: String,
    pub address: String,
}

fn blank_to_none(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_owned())
}

fn parse_role(raw: &str) -> Option<Role> {
    SELF_SERVICE_ROLES.into_iter().find(|role| role.as_str() == raw.trim())
}

fn validate_signup(form: &SignupForm) -> Result<SignupRequest, &'static str> {
    let full_name = form.full_name.trim();
    let email = form.email.trim();
    if full_name.is_empty() || email.is_empty() {
        return Err("Enter your name and email.");
    }
    if form.password.chars().count() < MIN_PASSWORD_LEN {
        return Err("Password must be at least 6 characters.");
    }
    let Some(role) = parse_role(&form.role) else {
        return Err("Choose donor, charity, or individual.");
    };
    Ok(SignupRequest {
        full_name: full_name.to_owned(),
        email: email.to_owned(),
        password: form.password.clone(),
        role,
        phone: blank_to_none(&form.phone),
        organization_name: blank_to_none(&form.organization_name),
        address: blank_to_none(&form.address),
    })
}

fn role_label(role: &Role) -> &'static str {
    match role {
        Role::Donor => "Donor (restaurant, store, household)",
        Role::Charity => "Charity / organisation",
        Role::Individual => "Individual",
        Role::Admin | Role::Unknown(_) => "",
    }
}

#[component]
pub fn SignupPage() -> impl IntoView {
    let form = RwSignal::new(SignupForm { role: Role::Individual.as_str().to_owned(), ..SignupForm::default() });
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let api = expect_context::<ApiClient>();
    let session = expect_context::<SessionContext>();
    let query = use_query_map();
    let navigate = use_navigate();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let req = match form.with(validate_signup) {
            Ok(req) => req,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        let from = query.with_untracked(|q| q.get("from"));
        busy.set(true);
        info.set("Creating account...".to_owned());

        let (api, session, navigate) = (api.clone(), session.clone(), navigate.clone());
        leptos::task::spawn_local(async move {
            match api.signup(&req).await {
                Ok(resp) => {
                    let role = resp.user.role.clone();
                    match session.login(resp) {
                        Ok(()) => {
                            info.set(String::new());
                            navigate(&post_login_target(from.as_deref(), &role), Default::default());
                        }
                        Err(e) => {
                            log::error!("signup: session not persisted: {e}");
                            info.set(SAVE_FAILED.to_owned());
                        }
                    }
                }
                Err(e) => info.set(e.user_message(SIGNUP_FAILED)),
            }
            busy.set(false);
        });
    };

    let needs_org = move || form.with(|f| f.role == Role::Charity.as_str() || f.role == Role::Donor.as_str());

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h2>"Create Your Account"</h2>
                <form class="auth-form" on:submit=on_submit>
                    <input
                        class="auth-input"
                        type="text"
                        placeholder="Full Name"
                        prop:value=move || form.with(|f| f.full_name.clone())
                        on:input=move |ev| form.update(|f| f.full_name = event_target_value(&ev))
                    />
                    <input
                        class="auth-input"
                        type="email"
                        placeholder="Email address"
                        prop:value=move || form.with(|f| f.email.clone())
                        on:input=move |ev| form.update(|f| f.email = event_target_value(&ev))
                    />
                    <input
                        class="auth-input"
                        type="password"
                        placeholder="Password"
                        prop:value=move || form.with(|f| f.password.clone())
                        on:input=move |ev| form.update(|f| f.password = event_target_value(&ev))
                    />
                    <input
                        class="auth-input"
                        type="tel"
                        placeholder="Phone (optional)"
                        prop:value=move || form.with(|f| f.phone.clone())
                        on:input=move |ev| form.update(|f| f.phone = event_target_value(&ev))
                    />
                    <select
                        class="auth-input"
                        prop:value=move || form.with(|f| f.role.clone())
                        on:change=move |ev| form.update(|f| f.role = event_target_value(&ev))
                    >
                        {SELF_SERVICE_ROLES
                            .into_iter()
                            .map(|role| view! { <option value=role.as_str().to_owned()>{role_label(&role)}</option> })
                            .collect_view()}
                    </select>
                    <Show when=needs_org>
                        <input
                            class="auth-input"
                            type="text"
                            placeholder="Organization name"
                            prop:value=move || form.with(|f| f.organization_name.clone())
                            on:input=move |ev| form.update(|f| f.organization_name = event_target_value(&ev))
                        />
                    </Show>
                    <input
                        class="auth-input"
                        type="text"
                        placeholder="Address (optional)"
                        prop:value=move || form.with(|f| f.address.clone())
                        on:input=move |ev| form.update(|f| f.address = event_target_value(&ev))
                    />
                    <button class="auth-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Creating..." } else { "Sign Up" }}
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="auth-message">{move || info.get()}</p>
                </Show>
                <p class="auth-links">
                    "Already have an account? "
                    <A href="/login">"Login"</A>
                </p>
            </div>
        </div>
    }
}
