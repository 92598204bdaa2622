//! Client configuration resolved at build time.
//!
//! The WASM bundle has no process environment, so values come from
//! `option_env!` when the crate is compiled. `from_lookup` takes any lookup
//! closure so parsing stays testable.
//!
//! Recognized variables:
//! - `FINASSIST_API_BASE_URL`: market-data API root (default `/api`)
//! - `FINASSIST_FIREBASE_API_KEY`: Identity Toolkit key (default empty)
//! - `FINASSIST_IDENTITY_BASE_URL`: Identity Toolkit root
//! - `FINASSIST_PROTECTED_ROUTES`: comma-separated path prefixes

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_BASE_URL: &str = "/api";
pub const DEFAULT_IDENTITY_BASE_URL: &str = "https://identitytoolkit.googleapis.com/v1";
pub const DEFAULT_PROTECTED_ROUTES: &[&str] = &["/dashboard", "/portfolio", "/stocks", "/profile"];

pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Route protection settings consumed by the route guard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteConfig {
    /// Path prefixes that require a signed-in principal, in declaration order.
    pub protected: Vec<String>,
    pub login_path: String,
    pub register_path: String,
    pub dashboard_path: String,
}

impl RouteConfig {
    pub fn new(protected: Vec<String>) -> Self {
        Self {
            protected,
            login_path: LOGIN_PATH.to_owned(),
            register_path: REGISTER_PATH.to_owned(),
            dashboard_path: DASHBOARD_PATH.to_owned(),
        }
    }
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PROTECTED_ROUTES.iter().map(|p| (*p).to_owned()).collect())
    }
}

/// Identity Toolkit connection settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdentityConfig {
    pub api_key: String,
    pub base_url: String,
}

impl IdentityConfig {
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub identity: IdentityConfig,
    pub routes: RouteConfig,
}

impl ClientConfig {
    /// Build config from variables captured at compile time.
    pub fn from_build_env() -> Self {
        Self::from_lookup(|key| {
            let value = match key {
                "FINASSIST_API_BASE_URL" => option_env!("FINASSIST_API_BASE_URL"),
                "FINASSIST_FIREBASE_API_KEY" => option_env!("FINASSIST_FIREBASE_API_KEY"),
                "FINASSIST_IDENTITY_BASE_URL" => option_env!("FINASSIST_IDENTITY_BASE_URL"),
                "FINASSIST_PROTECTED_ROUTES" => option_env!("FINASSIST_PROTECTED_ROUTES"),
                _ => None,
            };
            value.map(str::to_owned)
        })
    }

    /// Build config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = trim_base_url(lookup("FINASSIST_API_BASE_URL").as_deref().unwrap_or(DEFAULT_API_BASE_URL));
        let identity = IdentityConfig {
            api_key: lookup("FINASSIST_FIREBASE_API_KEY")
                .unwrap_or_default()
                .trim()
                .to_owned(),
            base_url: trim_base_url(
                lookup("FINASSIST_IDENTITY_BASE_URL")
                    .as_deref()
                    .unwrap_or(DEFAULT_IDENTITY_BASE_URL),
            ),
        };
        let routes = match lookup("FINASSIST_PROTECTED_ROUTES") {
            Some(raw) => RouteConfig::new(parse_route_list(&raw)),
            None => RouteConfig::default(),
        };
        Self { api_base_url, identity, routes }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn trim_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_owned()
}

/// Parse a comma-separated prefix list into normalized `/segment` paths.
///
/// Entries are trimmed, given a leading `/`, stripped of trailing `/`, and
/// deduplicated in first-seen order. Empty entries and bare `/` are dropped.
pub fn parse_route_list(raw: &str) -> Vec<String> {
    let mut routes: Vec<String> = Vec::new();
    for entry in raw.split(',') {
        let trimmed = entry.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            continue;
        }
        let route = if trimmed.starts_with('/') { trimmed.to_owned() } else { format!("/{trimmed}") };
        if !routes.contains(&route) {
            routes.push(route);
        }
    }
    routes
}
