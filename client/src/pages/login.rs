//! Login page: email + password against `POST /users/login`.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::net::api::ApiClient;
use crate::net::types::LoginRequest;
use crate::state::session::{SAVE_FAILED, SessionContext};
use crate::util::auth::post_login_target;

const MISSING_FIELDS: &str = "Enter your email and password.";
const LOGIN_FAILED: &str = "Invalid credentials";

fn validate_login_input(email: &str, password: &str) -> Result<(String, String), &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(MISSING_FIELDS);
    }
    Ok((email.to_owned(), password.to_owned()))
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let show_password = RwSignal::new(false);
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let query = use_query_map();
    let navigate = use_navigate();
    let api = expect_context::<ApiClient>();
    let session = expect_context::<SessionContext>();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let (email_value, password_value) = match validate_login_input(&email.get(), &password.get()) {
            Ok(values) => values,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        let from = query.with_untracked(|q| q.get("from"));
        busy.set(true);
        info.set("Logging in...".to_owned());

        let (api, session, navigate) = (api.clone(), session.clone(), navigate.clone());
        leptos::task::spawn_local(async move {
            let req = LoginRequest { email: email_value, password: password_value };
            match api.login(&req).await {
                Ok(resp) => {
                    let role = resp.user.role.clone();
                    log::info!("login: signed in user {}", resp.user.id);
                    match session.login(resp) {
                        Ok(()) => {
                            info.set(String::new());
                            navigate(&post_login_target(from.as_deref(), &role), Default::default());
                        }
                        Err(e) => {
                            log::error!("login: session not persisted: {e}");
                            info.set(SAVE_FAILED.to_owned());
                        }
                    }
                }
                Err(e) => info.set(e.user_message(LOGIN_FAILED)),
            }
            busy.set(false);
        });
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h2>"Welcome Back"</h2>
                <form class="auth-form" on:submit=on_submit>
                    <input
                        class="auth-input"
                        type="email"
                        placeholder="Email address"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <div class="auth-password">
                        <input
                            class="auth-input"
                            type=move || if show_password.get() { "text" } else { "password" }
                            placeholder="Password"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                        <button
                            type="button"
                            class="auth-password__toggle"
                            on:click=move |_| show_password.update(|shown| *shown = !*shown)
                        >
                            {move || if show_password.get() { "Hide" } else { "Show" }}
                        </button>
                    </div>
                    <button class="auth-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Logging in..." } else { "Login" }}
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="auth-message">{move || info.get()}</p>
                </Show>
                <p class="auth-links">
                    <A href="/forgot-password">"Forgot password?"</A>
                    " · "
                    <A href="/signup">"Create an account"</A>
                </p>
            </div>
        </div>
    }
}
