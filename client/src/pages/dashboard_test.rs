use super::*;
use crate::net::types::Principal;

fn principal(display_name: Option<&str>, email: Option<&str>) -> Principal {
    Principal {
        uid: "u1".to_owned(),
        email: email.map(str::to_owned),
        display_name: display_name.map(str::to_owned),
        financial_profile: None,
    }
}

#[test]
fn greeting_prefers_display_name() {
    let state = SessionState::signed_in(principal(Some("Ada"), Some("ada@example.com")));
    assert_eq!(greeting(&state), "Welcome back, Ada");
}

#[test]
fn greeting_falls_back_to_email_then_uid() {
    let state = SessionState::signed_in(principal(None, Some("ada@example.com")));
    assert_eq!(greeting(&state), "Welcome back, ada@example.com");

    let state = SessionState::signed_in(principal(Some("  "), None));
    assert_eq!(greeting(&state), "Welcome back, u1");
}

#[test]
fn greeting_without_principal_is_generic() {
    assert_eq!(greeting(&SessionState::signed_out()), "Welcome");
}

#[test]
fn published_date_keeps_calendar_part() {
    assert_eq!(published_date("2024-05-01T13:45:00Z"), "2024-05-01");
    assert_eq!(published_date("yesterday"), "yesterday");
    assert_eq!(published_date("5T"), "5T");
}
