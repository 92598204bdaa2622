use std::cell::RefCell;

use super::*;
use crate::net::types::Principal;

fn routes() -> RouteConfig {
    RouteConfig::new(vec!["/dashboard".to_owned(), "/portfolio".to_owned(), "/stocks".to_owned()])
}

fn signed_in() -> SessionState {
    SessionState::signed_in(Principal {
        uid: "u1".to_owned(),
        email: None,
        display_name: Some("Alice".to_owned()),
        financial_profile: None,
    })
}

fn login() -> RouteDecision {
    RouteDecision::Redirect("/login".to_owned())
}

fn dashboard() -> RouteDecision {
    RouteDecision::Redirect("/dashboard".to_owned())
}

// =============================================================
// is_protected
// =============================================================

#[test]
fn exact_prefix_and_nested_paths_are_protected() {
    let routes = routes();
    assert!(is_protected(&routes, "/dashboard"));
    assert!(is_protected(&routes, "/dashboard/"));
    assert!(is_protected(&routes, "/stocks/SPY"));
    assert!(is_protected(&routes, "/portfolio/holdings/VTI"));
}

#[test]
fn sibling_paths_sharing_a_prefix_are_not_protected() {
    let routes = routes();
    assert!(!is_protected(&routes, "/dashboards"));
    assert!(!is_protected(&routes, "/stocksplit"));
    assert!(!is_protected(&routes, "/"));
    assert!(!is_protected(&routes, "/login"));
}

#[test]
fn empty_route_set_protects_nothing() {
    let routes = RouteConfig::new(Vec::new());
    assert!(!is_protected(&routes, "/dashboard"));
}

// =============================================================
// decide
// =============================================================

#[test]
fn signed_out_on_protected_path_redirects_to_login() {
    let routes = routes();
    let state = SessionState::signed_out();
    for path in ["/dashboard", "/portfolio", "/stocks", "/dashboard/settings", "/stocks/QQQ"] {
        assert_eq!(decide(&routes, &state, path), login(), "path {path}");
    }
}

#[test]
fn signed_out_on_public_path_stays() {
    let routes = routes();
    let state = SessionState::signed_out();
    for path in ["/", "/login", "/register", "/about"] {
        assert_eq!(decide(&routes, &state, path), RouteDecision::Stay, "path {path}");
    }
}

#[test]
fn signed_in_on_auth_paths_redirects_to_dashboard() {
    let routes = routes();
    let state = signed_in();
    assert_eq!(decide(&routes, &state, "/login"), dashboard());
    assert_eq!(decide(&routes, &state, "/register"), dashboard());
}

#[test]
fn signed_in_elsewhere_stays() {
    let routes = routes();
    let state = signed_in();
    for path in ["/", "/dashboard", "/stocks/SPY", "/login/help"] {
        assert_eq!(decide(&routes, &state, path), RouteDecision::Stay, "path {path}");
    }
}

#[test]
fn never_redirects_while_loading() {
    let routes = routes();
    let loading_signed_out = SessionState::default();
    let loading_signed_in = SessionState { loading: true, ..signed_in() };
    for path in ["/dashboard", "/stocks/SPY", "/login", "/register", "/"] {
        assert_eq!(decide(&routes, &loading_signed_out, path), RouteDecision::Stay);
        assert_eq!(decide(&routes, &loading_signed_in, path), RouteDecision::Stay);
    }
}

#[test]
fn custom_auth_paths_are_honored() {
    let mut routes = routes();
    routes.login_path = "/auth/login".to_owned();
    routes.register_path = "/auth/register".to_owned();
    routes.dashboard_path = "/home".to_owned();

    assert_eq!(
        decide(&routes, &SessionState::signed_out(), "/dashboard"),
        RouteDecision::Redirect("/auth/login".to_owned())
    );
    assert_eq!(
        decide(&routes, &signed_in(), "/auth/register"),
        RouteDecision::Redirect("/home".to_owned())
    );
    assert_eq!(decide(&routes, &signed_in(), "/register"), RouteDecision::Stay);
}

// =============================================================
// enforce
// =============================================================

#[test]
fn enforce_navigates_once_on_redirect() {
    let visited = RefCell::new(Vec::new());
    let navigator = |path: &str| visited.borrow_mut().push(path.to_owned());

    let decision = enforce(&routes(), &SessionState::signed_out(), "/portfolio", &navigator);

    assert_eq!(decision, login());
    assert_eq!(*visited.borrow(), vec!["/login".to_owned()]);
}

#[test]
fn enforce_does_not_navigate_on_stay() {
    let visited = RefCell::new(Vec::new());
    let navigator = |path: &str| visited.borrow_mut().push(path.to_owned());

    enforce(&routes(), &SessionState::default(), "/portfolio", &navigator);
    enforce(&routes(), &signed_in(), "/portfolio", &navigator);

    assert!(visited.borrow().is_empty());
}
