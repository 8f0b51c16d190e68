//! Typed session model persisted by the client.
//!
//! DESIGN
//! ======
//! The remote API returns loosely-shaped user objects. They are parsed into
//! [`UserRecord`] once, at the storage/API boundary, so the rest of the app
//! never inspects raw JSON. Unrecognised fields survive in `extra` so a
//! save/load cycle is lossless.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Authorization role carried on every user record.
///
/// Serialized as its lowercase wire name. A role string this client does not
/// know is kept verbatim in [`Role::Unknown`] and written back unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// Posts surplus food.
    Donor,
    /// Organisation that claims donations.
    Charity,
    /// Private person that claims donations.
    Individual,
    /// Moderates users, donations, and claims.
    Admin,
    /// Any other role string, as received.
    Unknown(String),
}

impl Role {
    /// Parse a wire name; never fails.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "donor" => Self::Donor,
            "charity" => Self::Charity,
            "individual" => Self::Individual,
            "admin" => Self::Admin,
            other => Self::Unknown(other.to_owned()),
        }
    }

    /// Wire name of the role.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Donor => "donor",
            Self::Charity => "charity",
            Self::Individual => "individual",
            Self::Admin => "admin",
            Self::Unknown(name) => name,
        }
    }

    /// Charity and individual accounts share the claiming flows.
    #[must_use]
    pub fn is_claimant(&self) -> bool {
        matches!(self, Self::Charity | Self::Individual)
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from_name(&name))
    }
}

/// An authenticated user as returned by login, signup, and profile update.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Server-side user identifier; numeric ids are normalised to strings.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub full_name: String,
    /// Login email.
    pub email: String,
    /// Sole authorization discriminant.
    pub role: Role,
    /// Whether an admin has left the account enabled.
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserRecord {
    /// Overlay `patch` (a partial user object) on top of this record.
    ///
    /// Fields present in `patch` win. The merged object is re-validated, so a
    /// patch that breaks the record shape is rejected rather than stored.
    ///
    /// # Errors
    ///
    /// Returns the serde error when `patch` is not an object or the merged
    /// record no longer parses as a [`UserRecord`].
    pub fn merged_with(&self, patch: &Value) -> Result<Self, serde_json::Error> {
        let Value::Object(fields) = patch else {
            return Err(serde_json::Error::custom("user patch must be a JSON object"));
        };
        let mut base = match serde_json::to_value(self)? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        for (key, value) in fields {
            base.insert(key.clone(), value.clone());
        }
        serde_json::from_value(Value::Object(base))
    }

    /// Name to greet the user with.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.full_name.trim().is_empty() { "user" } else { &self.full_name }
    }
}

fn default_active() -> bool {
    true
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(id) if !id.is_empty() => Ok(id),
        Value::Number(number) if number.is_i64() || number.is_u64() => Ok(number.to_string()),
        _ => Err(D::Error::custom("expected non-empty string or integer id")),
    }
}

/// The persisted pair of user record and bearer token.
///
/// Both halves always travel together; "no session" is `Option::None`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user: UserRecord,
    pub token: String,
}

/// Response body of `POST /users/login` and `POST /users/signup`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: UserRecord,
    pub token: String,
}

impl From<AuthResponse> for Session {
    fn from(resp: AuthResponse) -> Self {
        Self { user: resp.user, token: resp.token }
    }
}
