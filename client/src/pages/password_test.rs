use super::*;

#[test]
fn validate_reset_input_builds_request() {
    let req = validate_reset_input(Some(" tok123 "), "newpass1", "newpass1").unwrap();
    assert_eq!(req, ResetPasswordRequest { token: "tok123".to_owned(), password: "newpass1".to_owned() });
}

#[test]
fn validate_reset_input_requires_token() {
    assert_eq!(validate_reset_input(None, "newpass1", "newpass1"), Err("This reset link is missing its token."));
    assert_eq!(validate_reset_input(Some(" "), "newpass1", "newpass1"), Err("This reset link is missing its token."));
}

#[test]
fn validate_reset_input_checks_length_then_match() {
    assert_eq!(validate_reset_input(Some("t"), "short", "short"), Err("Password must be at least 6 characters."));
    assert_eq!(validate_reset_input(Some("t"), "newpass1", "newpass2"), Err("Passwords do not match."));
}
