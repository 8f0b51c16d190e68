use super::*;
use crate::test_support::{encode_segment, make_token};

// =============================================================
// decode_claims
// =============================================================

#[test]
fn decode_claims_reads_exp_and_optional_fields() {
    let payload = encode_segment(r#"{"exp": 1700000000, "sub": "u1", "role": "donor"}"#);
    let claims = decode_claims(&format!("h.{payload}.s")).unwrap();
    assert_eq!(claims.exp, 1_700_000_000);
    assert_eq!(claims.sub.as_deref(), Some("u1"));
    assert_eq!(claims.role.as_deref(), Some("donor"));
}

#[test]
fn decode_claims_accepts_padded_payload() {
    // 10 payload bytes need two padding characters.
    let payload = format!("{}==", encode_segment(r#"{"exp":10}"#));
    let token = format!("h.{payload}.s");
    assert_eq!(decode_claims(&token).unwrap().exp, 10);
}

#[test]
fn decode_claims_floors_fractional_exp() {
    let token = format!("h.{}.s", encode_segment(r#"{"exp": 99.9}"#));
    assert_eq!(decode_claims(&token).unwrap().exp, 99);
}

#[test]
fn decode_claims_rejects_wrong_segment_count() {
    assert!(matches!(decode_claims(""), Err(TokenError::Segments(1))));
    assert!(matches!(decode_claims("a.b"), Err(TokenError::Segments(2))));
    assert!(matches!(decode_claims("a.b.c.d"), Err(TokenError::Segments(4))));
}

#[test]
fn decode_claims_rejects_bad_base64() {
    assert!(matches!(decode_claims("h.!!!.s"), Err(TokenError::Encoding(_))));
}

#[test]
fn decode_claims_rejects_payload_without_exp() {
    let token = format!("h.{}.s", encode_segment(r#"{"sub": "u1"}"#));
    assert!(matches!(decode_claims(&token), Err(TokenError::Payload(_))));
}

#[test]
fn decode_claims_rejects_string_exp() {
    let token = format!("h.{}.s", encode_segment(r#"{"exp": "soon"}"#));
    assert!(matches!(decode_claims(&token), Err(TokenError::Payload(_))));
}

// =============================================================
// Expiry
// =============================================================

#[test]
fn expired_at_or_before_now() {
    let claims = decode_claims(&make_token(1_000)).unwrap();
    assert!(!claims.is_expired_at(999));
    assert!(claims.is_expired_at(1_000));
    assert!(claims.is_expired_at(1_001));
}

#[test]
fn decode_claims_keeps_issue_time_and_numeric_id() {
    let payload = encode_segment(r#"{"exp": 20, "iat": 10, "id": 42}"#);
    let claims = decode_claims(&format!("h.{payload}.s")).unwrap();
    assert_eq!(claims.iat, Some(10.0));
    assert_eq!(claims.id, Some(serde_json::json!(42)));
    assert_eq!(claims.role, None);
}
