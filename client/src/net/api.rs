//! REST API client for the remote FoodShare backend.
//!
//! Client-side (csr): real HTTP calls via `gloo-net`.
//! Elsewhere: every call returns [`ApiError::Unavailable`], since these
//! endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Result` outputs instead of panics so failed loads and
//! mutations degrade to an inline message. Non-2xx responses keep the
//! server's `{ "error": ... }` text when one is present.
//!
//! Every request funnels through `execute`, which returns the raw body text;
//! decoding is plain `serde_json` on that text.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::Serialize;
use serde::de::DeserializeOwned;
use session::AuthHeader;

use super::types::{
    AuthResponse, ClaimRecord, ClaimRequest, Donation, DonationClaim, DonationDraft, ErrorBody,
    ForgotPasswordRequest, LoginRequest, MessageResponse, MyClaim, ProfileUpdate, ResetPasswordRequest,
    SignupRequest, UserRecord, UserStatusUpdate,
};
use crate::config::ClientConfig;

/// Failure of an API call.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request failed with status {status}")]
    Status { status: u16, message: Option<String> },
    #[error("invalid response body: {0}")]
    Decode(String),
    #[error("could not encode request body: {0}")]
    Encode(String),
    #[error("not available outside the browser")]
    Unavailable,
}

impl ApiError {
    /// Text to show the user: the server's message if it sent one.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Status { message: Some(message), .. } if !message.trim().is_empty() => message.clone(),
            _ => fallback.to_owned(),
        }
    }
}

#[cfg(feature = "csr")]
impl From<gloo_net::Error> for ApiError {
    fn from(err: gloo_net::Error) -> Self {
        Self::Network(err.to_string())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

/// HTTP client bound to the API base URL and the session's bearer header.
#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: String,
    auth: AuthHeader,
}

impl ApiClient {
    pub fn new(config: &ClientConfig, auth: AuthHeader) -> Self {
        Self { base_url: config.api_base.clone(), auth }
    }

    /// Absolute URL for an API path such as `/users/login`.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    // =========================================================
    // Accounts
    // =========================================================

    /// `POST /users/login`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-OK status, or an
    /// unparseable `{ user, token }` body.
    pub async fn login(&self, req: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.send(Method::Post, "/users/login", req).await
    }

    /// `POST /users/signup`.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::login`].
    pub async fn signup(&self, req: &SignupRequest) -> Result<AuthResponse, ApiError> {
        self.send(Method::Post, "/users/signup", req).await
    }

    /// `POST /users/forgot-password`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the request fails or is rejected.
    pub async fn forgot_password(&self, email: &str) -> Result<MessageResponse, ApiError> {
        let req = ForgotPasswordRequest { email: email.to_owned() };
        self.send(Method::Post, "/users/forgot-password", &req).await
    }

    /// `POST /users/reset-password`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the request fails or the reset token is refused.
    pub async fn reset_password(&self, req: &ResetPasswordRequest) -> Result<MessageResponse, ApiError> {
        self.send(Method::Post, "/users/reset-password", req).await
    }

    /// `PUT /users/{id}`; returns the server's (possibly partial) user object.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the request fails or is rejected.
    pub async fn update_user(&self, user_id: &str, update: &ProfileUpdate) -> Result<serde_json::Value, ApiError> {
        self.send(Method::Put, &user_endpoint(user_id), update).await
    }

    // =========================================================
    // Donations
    // =========================================================

    /// `GET /donations/public/available`: open donations, no login needed.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the request fails or rows do not parse.
    pub async fn available_donations(&self) -> Result<Vec<Donation>, ApiError> {
        self.fetch_list("/donations/public/available").await
    }

    /// `GET /donations/my`: the signed-in donor's donations with claim totals.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the request fails or rows do not parse.
    pub async fn my_donations(&self) -> Result<Vec<Donation>, ApiError> {
        self.fetch_list("/donations/my").await
    }

    /// `GET /donations` (admin).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the request fails or rows do not parse.
    pub async fn all_donations(&self) -> Result<Vec<Donation>, ApiError> {
        self.fetch_list("/donations").await
    }

    /// `GET /donations/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the donation is missing or does not parse.
    pub async fn donation(&self, donation_id: &str) -> Result<Donation, ApiError> {
        decode_body(&self.execute(Method::Get, &donation_endpoint(donation_id), None).await?)
    }

    /// `POST /donations`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the server rejects the draft.
    pub async fn create_donation(&self, draft: &DonationDraft) -> Result<(), ApiError> {
        self.submit(Method::Post, "/donations", draft).await
    }

    /// `PUT /donations/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the server rejects the update.
    pub async fn update_donation(&self, donation_id: &str, draft: &DonationDraft) -> Result<(), ApiError> {
        self.submit(Method::Put, &donation_endpoint(donation_id), draft).await
    }

    /// `DELETE /donations/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the request fails or is rejected.
    pub async fn delete_donation(&self, donation_id: &str) -> Result<(), ApiError> {
        self.execute(Method::Delete, &donation_endpoint(donation_id), None).await.map(drop)
    }

    /// `GET /donations/{id}/claims`: who claimed a donor's donation.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the request fails or rows do not parse.
    pub async fn donation_claims(&self, donation_id: &str) -> Result<Vec<DonationClaim>, ApiError> {
        self.fetch_list(&donation_claims_endpoint(donation_id)).await
    }

    // =========================================================
    // Claims
    // =========================================================

    /// `POST /claims`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the claim is refused, e.g. more than remains.
    pub async fn create_claim(&self, req: &ClaimRequest) -> Result<(), ApiError> {
        self.submit(Method::Post, "/claims", req).await
    }

    /// `GET /claims/my`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the request fails or rows do not parse.
    pub async fn my_claims(&self) -> Result<Vec<MyClaim>, ApiError> {
        self.fetch_list("/claims/my").await
    }

    /// `GET /claims` (admin).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the request fails or rows do not parse.
    pub async fn all_claims(&self) -> Result<Vec<ClaimRecord>, ApiError> {
        self.fetch_list("/claims").await
    }

    /// `DELETE /claims/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the request fails or is rejected.
    pub async fn cancel_claim(&self, claim_id: &str) -> Result<(), ApiError> {
        self.execute(Method::Delete, &claim_endpoint(claim_id), None).await.map(drop)
    }

    // =========================================================
    // Admin
    // =========================================================

    /// `GET /admin/users`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the request fails or rows do not parse.
    pub async fn admin_users(&self) -> Result<Vec<UserRecord>, ApiError> {
        self.fetch_list("/admin/users").await
    }

    /// `PATCH /admin/users/{id}/status`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the request fails or is rejected.
    pub async fn set_user_status(&self, user_id: &str, is_active: bool) -> Result<(), ApiError> {
        self.submit(Method::Patch, &user_status_endpoint(user_id), &UserStatusUpdate { is_active }).await
    }

    // =========================================================
    // Transport
    // =========================================================

    async fn fetch_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ApiError> {
        decode_list(&self.execute(Method::Get, path, None).await?)
    }

    async fn send<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        decode_body(&self.execute(method, path, Some(encode_body(body)?)).await?)
    }

    /// Send `body`, ignoring whatever the server answers on success.
    async fn submit<B: Serialize>(&self, method: Method, path: &str, body: &B) -> Result<(), ApiError> {
        self.execute(method, path, Some(encode_body(body)?)).await.map(drop)
    }

    async fn execute(&self, method: Method, path: &str, body: Option<String>) -> Result<String, ApiError> {
        #[cfg(feature = "csr")]
        {
            use gloo_net::http::Request;

            let url = self.url(path);
            let mut builder = match method {
                Method::Get => Request::get(&url),
                Method::Post => Request::post(&url),
                Method::Put => Request::put(&url),
                Method::Patch => Request::patch(&url),
                Method::Delete => Request::delete(&url),
            };
            if let Some(value) = self.auth.value() {
                builder = builder.header("Authorization", &value);
            }
            let request = match body {
                Some(json) => builder.header("Content-Type", "application/json").body(json)?,
                None => builder.build()?,
            };
            let resp = request.send().await?;
            let text = resp.text().await?;
            if !resp.ok() {
                log::debug!("api: {method:?} {path} failed with {}", resp.status());
                return Err(ApiError::Status { status: resp.status(), message: error_message(&text) });
            }
            Ok(text)
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (method, path, body, &self.auth);
            Err(ApiError::Unavailable)
        }
    }
}

fn encode_body<B: Serialize>(body: &B) -> Result<String, ApiError> {
    serde_json::to_string(body).map_err(|e| ApiError::Encode(e.to_string()))
}

fn decode_body<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))
}

/// List endpoints may answer with an empty body or `null` when nothing matches.
fn decode_list<T: DeserializeOwned>(text: &str) -> Result<Vec<T>, ApiError> {
    match text.trim() {
        "" | "null" => Ok(Vec::new()),
        body => decode_body(body),
    }
}

fn error_message(text: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(text).ok().map(|body| body.error)
}

fn user_endpoint(user_id: &str) -> String {
    format!("/users/{}", urlencoding::encode(user_id))
}

fn user_status_endpoint(user_id: &str) -> String {
    format!("/admin/users/{}/status", urlencoding::encode(user_id))
}

fn donation_endpoint(donation_id: &str) -> String {
    format!("/donations/{}", urlencoding::encode(donation_id))
}

fn donation_claims_endpoint(donation_id: &str) -> String {
    format!("/donations/{}/claims", urlencoding::encode(donation_id))
}

fn claim_endpoint(claim_id: &str) -> String {
    format!("/claims/{}", urlencoding::encode(claim_id))
}
