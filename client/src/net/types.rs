//! Request/response DTOs for the remote REST API.
//!
//! DESIGN
//! ======
//! The user record and `{ user, token }` auth payload live in the `session`
//! crate, since the session store persists them; they are re-exported here
//! so page code imports every wire type from one place.
//!
//! Marketplace rows come from SQL views on the server. Aggregates such as
//! `total_claimed` may arrive as numbers, numeric strings, or `null`, so
//! count fields go through [`deserialize_count`].

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

pub use session::{AuthResponse, Role, UserRecord};

/// Body of `POST /users/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of `POST /users/signup`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SignupRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Body of `POST /users/forgot-password`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Body of `POST /users/reset-password`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResetPasswordRequest {
    /// Reset token delivered by email.
    pub token: String,
    pub password: String,
}

/// Body of `PUT /users/{id}`: the editable subset of a profile.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    pub full_name: String,
    pub phone: String,
    pub organization_name: String,
}

impl ProfileUpdate {
    /// Prefill the edit form from the stored user.
    pub fn from_user(user: &UserRecord) -> Self {
        Self {
            full_name: user.full_name.clone(),
            phone: user.phone.clone().unwrap_or_default(),
            organization_name: user.organization_name.clone().unwrap_or_default(),
        }
    }
}

/// Generic acknowledgement body (`{ "message": "..." }`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Error body returned with non-2xx statuses.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

// =============================================================
// Donations
// =============================================================

/// Unit shown when a donation does not name one.
pub const DEFAULT_UNIT: &str = "portions";

/// A donation row from `/donations`, `/donations/my`, or the public list.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Donation {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub food_type: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub quantity: i64,
    /// Still claimable; only the public listing computes it.
    #[serde(default, deserialize_with = "deserialize_opt_count")]
    pub remaining_qty: Option<i64>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub pickup_location: Option<String>,
    #[serde(default)]
    pub pickup_instructions: Option<String>,
    #[serde(default)]
    pub expires_at: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub total_claimed: i64,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub claim_count: i64,
}

impl Donation {
    /// Upper bound for a new claim.
    pub fn available(&self) -> i64 {
        self.remaining_qty.unwrap_or(self.quantity)
    }

    /// Portions not yet claimed, as the donor sees it. May be negative when
    /// the server over-allocated.
    pub fn unclaimed(&self) -> i64 {
        self.quantity - self.total_claimed
    }

    /// Claimed share in percent, clamped to `0..=100`.
    #[allow(clippy::cast_precision_loss)]
    pub fn claimed_percent(&self) -> f64 {
        if self.quantity <= 0 {
            return 0.0;
        }
        (self.total_claimed as f64 / self.quantity as f64 * 100.0).clamp(0.0, 100.0)
    }

    pub fn unit_label(&self) -> &str {
        self.unit.as_deref().map(str::trim).filter(|unit| !unit.is_empty()).unwrap_or(DEFAULT_UNIT)
    }
}

/// Totals across a donor's donations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DonorStats {
    pub posted: usize,
    pub claimed: i64,
    pub remaining: i64,
}

impl DonorStats {
    pub fn from_donations(donations: &[Donation]) -> Self {
        donations.iter().fold(Self { posted: donations.len(), ..Self::default() }, |acc, d| Self {
            claimed: acc.claimed + d.total_claimed,
            remaining: acc.remaining + d.unclaimed(),
            ..acc
        })
    }
}

/// Body of `POST /donations` and `PUT /donations/{id}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DonationDraft {
    pub title: String,
    pub description: String,
    pub food_type: String,
    pub category: String,
    pub quantity: i64,
    pub unit: String,
    pub image_url: String,
    pub pickup_location: String,
    pub pickup_instructions: String,
    /// `YYYY-MM-DD` or a full timestamp; omitted when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
}

impl Default for DonationDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            food_type: "veg".to_owned(),
            category: String::new(),
            quantity: 1,
            unit: DEFAULT_UNIT.to_owned(),
            image_url: String::new(),
            pickup_location: String::new(),
            pickup_instructions: String::new(),
            expires_at: None,
        }
    }
}

impl DonationDraft {
    /// Prefill the edit form from a stored donation.
    pub fn from_donation(donation: &Donation) -> Self {
        Self {
            title: donation.title.clone(),
            description: donation.description.clone().unwrap_or_default(),
            food_type: donation.food_type.clone().unwrap_or_else(|| "veg".to_owned()),
            category: donation.category.clone().unwrap_or_default(),
            quantity: donation.quantity,
            unit: donation.unit_label().to_owned(),
            image_url: donation.image_url.clone().unwrap_or_default(),
            pickup_location: donation.pickup_location.clone().unwrap_or_default(),
            pickup_instructions: donation.pickup_instructions.clone().unwrap_or_default(),
            expires_at: donation.expires_at.clone().filter(|at| !at.trim().is_empty()),
        }
    }
}

// =============================================================
// Claims
// =============================================================

/// Body of `POST /claims`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ClaimRequest {
    pub donation_id: String,
    pub quantity: i64,
    /// RFC 3339 UTC instant.
    pub pickup_time: String,
}

/// Row of `GET /claims/my`: a claim joined with its donation.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct MyClaim {
    #[serde(deserialize_with = "deserialize_id")]
    pub claim_id: String,
    #[serde(default)]
    pub donation_title: Option<String>,
    #[serde(default)]
    pub donation_description: Option<String>,
    #[serde(default)]
    pub donation_image: Option<String>,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub claimed_quantity: i64,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub total_quantity: i64,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub pickup_location: Option<String>,
    #[serde(default)]
    pub pickup_time: Option<String>,
    /// `reserved`, `picked_up`, or whatever else the server reports.
    #[serde(default)]
    pub claim_status: String,
    #[serde(default)]
    pub donor_name: Option<String>,
}

/// Row of `GET /donations/{id}/claims`, shown to the donor.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct DonationClaim {
    #[serde(deserialize_with = "deserialize_id")]
    pub claim_id: String,
    #[serde(default)]
    pub charity_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub quantity: i64,
    #[serde(default)]
    pub pickup_time: Option<String>,
}

/// Row of the admin-wide `GET /claims`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ClaimRecord {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub donation_title: Option<String>,
    #[serde(default)]
    pub charity_name: Option<String>,
    #[serde(default)]
    pub pickup_time: Option<String>,
}

// =============================================================
// Admin
// =============================================================

/// Body of `PATCH /admin/users/{id}/status`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct UserStatusUpdate {
    pub is_active: bool,
}

// =============================================================
// Lenient field decoding
// =============================================================

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(id) if !id.is_empty() => Ok(id),
        serde_json::Value::Number(number) if number.is_i64() || number.is_u64() => Ok(number.to_string()),
        _ => Err(D::Error::custom("expected non-empty string or integer id")),
    }
}

fn deserialize_count<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(deserialize_opt_count(deserializer)?.unwrap_or(0))
}

fn deserialize_opt_count<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                return Ok(Some(int));
            }
            #[allow(clippy::cast_possible_truncation)]
            if let Some(float) = number.as_f64()
                && float.is_finite()
                && float.fract() == 0.0
            {
                return Ok(Some(float as i64));
            }
            Err(D::Error::custom("expected integer-compatible count"))
        }
        serde_json::Value::String(raw) => raw
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("expected numeric count, got {raw:?}"))),
        _ => Err(D::Error::custom("expected count")),
    }
}
