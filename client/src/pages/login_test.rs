use super::*;

#[test]
fn validate_login_input_trims_email_and_keeps_password() {
    assert_eq!(
        validate_login_input("  user@example.com  ", " pw with spaces "),
        Ok(("user@example.com".to_owned(), " pw with spaces ".to_owned()))
    );
}

#[test]
fn validate_login_input_requires_both_fields() {
    assert_eq!(validate_login_input("   ", "secret"), Err("Enter your email and password."));
    assert_eq!(validate_login_input("a@b.com", ""), Err("Enter your email and password."));
}

#[test]
fn validate_login_input_rejects_malformed_email() {
    assert_eq!(validate_login_input("not-an-email", "secret"), Err("Enter a valid email address."));
}

#[test]
fn looks_like_email_shape_check() {
    assert!(looks_like_email("a@b.co"));
    assert!(!looks_like_email("@b.co"));
    assert!(!looks_like_email("a@localhost"));
    assert!(!looks_like_email("a@.com"));
    assert!(!looks_like_email("ab.com"));
}
