use super::*;

// =============================================================
// Helpers
// =============================================================

fn make_form() -> SignupForm {
    SignupForm {
        full_name: " Ivy Individual ".to_owned(),
        email: "ivy@example.com ".to_owned(),
        password: "secret1".to_owned(),
        phone: "  ".to_owned(),
        role: "individual".to_owned(),
        organization_name: String::new(),
        address: " 12 Elm St ".to_owned(),
    }
}

// =============================================================
// validate_signup
// =============================================================

#[test]
fn validate_signup_trims_and_normalizes_optionals() {
    let req = validate_signup(&make_form()).unwrap();
    assert_eq!(req.full_name, "Ivy Individual");
    assert_eq!(req.email, "ivy@example.com");
    assert_eq!(req.role, Role::Individual);
    assert_eq!(req.phone, None);
    assert_eq!(req.organization_name, None);
    assert_eq!(req.address.as_deref(), Some("12 Elm St"));
}

#[test]
fn validate_signup_requires_name_and_email() {
    let mut form = make_form();
    form.full_name = "   ".to_owned();
    assert_eq!(validate_signup(&form), Err("Enter your name and email."));
}

#[test]
fn validate_signup_enforces_password_length() {
    let mut form = make_form();
    form.password = "12345".to_owned();
    assert_eq!(validate_signup(&form), Err("Password must be at least 6 characters."));
}

#[test]
fn validate_signup_rejects_admin_or_invented_roles() {
    for role in ["admin", "volunteer", ""] {
        let mut form = make_form();
        form.role = role.to_owned();
        assert_eq!(validate_signup(&form), Err("Choose donor, charity, or individual."), "role {role:?}");
    }
}

#[test]
fn validate_signup_accepts_each_self_service_role() {
    for role in SELF_SERVICE_ROLES {
        let mut form = make_form();
        form.role = role.as_str().to_owned();
        assert_eq!(validate_signup(&form).unwrap().role, role);
    }
}
