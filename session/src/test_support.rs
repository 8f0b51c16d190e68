//! Fixtures shared by the crate's unit tests.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::Map;

use crate::types::{Role, Session, UserRecord};

pub(crate) const NOW: i64 = 1_750_000_000;

pub(crate) fn encode_segment(json: &str) -> String {
    URL_SAFE_NO_PAD.encode(json)
}

/// Unsigned token whose payload carries `exp`.
pub(crate) fn make_token(exp: i64) -> String {
    let header = encode_segment(r#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = encode_segment(&format!(r#"{{"id":"u1","exp":{exp}}}"#));
    format!("{header}.{payload}.signature")
}

pub(crate) fn make_user(role: Role) -> UserRecord {
    UserRecord {
        id: "u1".to_owned(),
        full_name: "Test User".to_owned(),
        email: "test@example.com".to_owned(),
        role,
        is_active: true,
        phone: None,
        organization_name: None,
        address: None,
        extra: Map::new(),
    }
}

pub(crate) fn make_session(role: Role, exp: i64) -> Session {
    Session { user: make_user(role), token: make_token(exp) }
}
