//! Route protection shared by every page.
//!
//! SYSTEM CONTEXT
//! ==============
//! `decide` is the whole rule; `install_route_guard` re-runs it whenever the
//! session or the current pathname changes. Redirects are client-side only
//! and are not a security boundary: protected markup can render for a frame
//! before navigation happens.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_location;

use crate::config::RouteConfig;
use crate::state::auth::SessionState;

/// Fire-and-forget navigation primitive.
pub trait Navigator {
    fn redirect(&self, path: &str);
}

impl<F> Navigator for F
where
    F: Fn(&str),
{
    fn redirect(&self, path: &str) {
        self(path);
    }
}

/// Outcome of evaluating the protection rule for one path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouteDecision {
    Stay,
    Redirect(String),
}

/// True when `path` equals a protected prefix or sits underneath one.
pub fn is_protected(routes: &RouteConfig, path: &str) -> bool {
    routes.protected.iter().any(|prefix| {
        path == prefix
            || path
                .strip_prefix(prefix.as_str())
                .is_some_and(|rest| rest.starts_with('/'))
    })
}

/// Decide whether the current path must be left.
pub fn decide(routes: &RouteConfig, state: &SessionState, path: &str) -> RouteDecision {
    if state.loading {
        return RouteDecision::Stay;
    }
    match &state.principal {
        None if is_protected(routes, path) => RouteDecision::Redirect(routes.login_path.clone()),
        Some(_) if path == routes.login_path || path == routes.register_path => {
            RouteDecision::Redirect(routes.dashboard_path.clone())
        }
        _ => RouteDecision::Stay,
    }
}

/// Evaluate the rule and navigate if needed. Returns the decision taken.
pub fn enforce<N>(routes: &RouteConfig, state: &SessionState, path: &str, navigator: &N) -> RouteDecision
where
    N: Navigator + ?Sized,
{
    let decision = decide(routes, state, path);
    if let RouteDecision::Redirect(target) = &decision {
        navigator.redirect(target);
    }
    decision
}

/// Re-run the protection rule whenever the session or pathname changes.
///
/// Must be called inside the `<Router>` so the location is available.
pub fn install_route_guard<F>(session: RwSignal<SessionState>, routes: RouteConfig, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    let pathname = use_location().pathname;
    Effect::new(move || {
        let state = session.get();
        let path = pathname.get();
        let navigate = navigate.clone();
        enforce(&routes, &state, &path, &move |target: &str| {
            navigate(target, NavigateOptions { replace: true, ..NavigateOptions::default() });
        });
    });
}
