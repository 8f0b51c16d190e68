//! Forgot-password and reset-password pages.
//!
//! Both are unguarded: a visitor may be signed out or signed in when they
//! follow an emailed reset link.

#[cfg(test)]
#[path = "password_test.rs"]
mod password_test;

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_query_map;

use crate::net::api::ApiClient;
use crate::net::types::ResetPasswordRequest;
use crate::pages::signup::MIN_PASSWORD_LEN;

fn validate_reset_input(token: Option<&str>, password: &str, confirm: &str) -> Result<ResetPasswordRequest, &'static str> {
    let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) else {
        return Err("This reset link is missing its token.");
    };
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err("Password must be at least 6 characters.");
    }
    if password != confirm {
        return Err("Passwords do not match.");
    }
    Ok(ResetPasswordRequest { token: token.to_owned(), password: password.to_owned() })
}

#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
    let email = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let api = expect_context::<ApiClient>();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let email_value = email.get().trim().to_owned();
        if email_value.is_empty() {
            info.set("Enter your email first.".to_owned());
            return;
        }
        busy.set(true);
        let api = api.clone();
        leptos::task::spawn_local(async move {
            match api.forgot_password(&email_value).await {
                Ok(resp) => info.set(resp.message.unwrap_or_else(|| "Check your inbox for a reset link.".to_owned())),
                Err(e) => info.set(e.user_message("Could not send reset email")),
            }
            busy.set(false);
        });
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h2>"Forgot Password"</h2>
                <form class="auth-form" on:submit=on_submit>
                    <input
                        class="auth-input"
                        type="email"
                        placeholder="Email address"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <button class="auth-button" type="submit" disabled=move || busy.get()>"Send Reset Link"</button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="auth-message">{move || info.get()}</p>
                </Show>
                <p class="auth-links"><A href="/login">"Back to login"</A></p>
            </div>
        </div>
    }
}

#[component]
pub fn ResetPasswordPage() -> impl IntoView {
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let done = RwSignal::new(false);
    let api = expect_context::<ApiClient>();
    let query = use_query_map();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let token = query.with_untracked(|q| q.get("token"));
        let req = match validate_reset_input(token.as_deref(), &password.get(), &confirm.get()) {
            Ok(req) => req,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        busy.set(true);
        let api = api.clone();
        leptos::task::spawn_local(async move {
            match api.reset_password(&req).await {
                Ok(resp) => {
                    done.set(true);
                    info.set(resp.message.unwrap_or_else(|| "Password updated. You can log in now.".to_owned()));
                }
                Err(e) => info.set(e.user_message("Reset link is invalid or expired")),
            }
            busy.set(false);
        });
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h2>"Reset Password"</h2>
                <Show when=move || !done.get()>
                    <form class="auth-form" on:submit=on_submit.clone()>
                        <input
                            class="auth-input"
                            type="password"
                            placeholder="New password"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                        <input
                            class="auth-input"
                            type="password"
                            placeholder="Confirm password"
                            prop:value=move || confirm.get()
                            on:input=move |ev| confirm.set(event_target_value(&ev))
                        />
                        <button class="auth-button" type="submit" disabled=move || busy.get()>"Update Password"</button>
                    </form>
                </Show>
                <Show when=move || !info.get().is_empty()>
                    <p class="auth-message">{move || info.get()}</p>
                </Show>
                <p class="auth-links"><A href="/login">"Back to login"</A></p>
            </div>
        </div>
    }
}
