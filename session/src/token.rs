//! Bearer-token payload decoding.
//!
//! Tokens are compact three-segment credentials (`header.payload.signature`,
//! base64url). The client never verifies signatures; it only reads the
//! payload to learn when the server will stop honouring the token.

#[cfg(test)]
#[path = "token_test.rs"]
mod token_test;

use base64::Engine as _;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

/// URL-safe alphabet; issuers differ on whether they keep `=` padding.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Error returned by [`decode_claims`].
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// The token is not three dot-separated segments.
    #[error("token must have 3 segments, found {0}")]
    Segments(usize),
    /// The payload segment is not valid base64url.
    #[error("invalid token payload encoding: {0}")]
    Encoding(#[from] base64::DecodeError),
    /// The payload is not a JSON object with a numeric `exp`.
    #[error("invalid token payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Claims read from the token payload.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Claims {
    /// Expiry instant, seconds since the Unix epoch.
    #[serde(deserialize_with = "deserialize_epoch_secs")]
    pub exp: i64,
    /// Issue instant; informational only.
    #[serde(default)]
    pub iat: Option<f64>,
    #[serde(default)]
    pub sub: Option<String>,
    /// User id as the backend encodes it (string or number).
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub role: Option<String>,
}

impl Claims {
    /// A token is dead at its expiry instant, not one second after.
    #[must_use]
    pub fn is_expired_at(&self, now_secs: i64) -> bool {
        self.exp <= now_secs
    }
}

/// Decode the payload segment of `token`.
///
/// # Errors
///
/// Returns [`TokenError::Segments`] for anything other than three segments,
/// [`TokenError::Encoding`] for bad base64, and [`TokenError::Payload`] when
/// the JSON is malformed or lacks `exp`.
pub fn decode_claims(token: &str) -> Result<Claims, TokenError> {
    let segments: Vec<&str> = token.trim().split('.').collect();
    let [_, payload, _] = segments.as_slice() else {
        return Err(TokenError::Segments(segments.len()));
    };
    let bytes = PAYLOAD_ENGINE.decode(payload)?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn deserialize_epoch_secs<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let serde_json::Value::Number(number) = serde_json::Value::deserialize(deserializer)? else {
        return Err(D::Error::custom("expected numeric exp"));
    };
    if let Some(secs) = number.as_i64() {
        return Ok(secs);
    }
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    if let Some(float) = number.as_f64()
        && float.is_finite()
        && float >= i64::MIN as f64
        && float <= i64::MAX as f64
    {
        return Ok(float.floor() as i64);
    }
    Err(D::Error::custom("exp out of range"))
}
