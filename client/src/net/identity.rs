//! Identity-provider boundary and the Firebase Identity Toolkit adapter.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session gate only sees `IdentityProvider::subscribe`. `FirebaseIdentity`
//! implements it over the Identity Toolkit REST API, persisting the session in
//! local storage and fanning auth-state changes out to registered listeners.
//!
//! ERROR HANDLING
//! ==============
//! Sign-in and registration return `IdentityError` so forms can show a reason.
//! Subscription fails only when the adapter has no API key; the gate treats
//! that as signed out.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "identity_test.rs"]
mod identity_test;

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::types::Principal;
use crate::config::IdentityConfig;
use crate::util::storage::{KeyValueStorage, SESSION_STORAGE_KEY, load_json, save_json};

/// Callback invoked with the new principal (or `None` when signed out).
pub type AuthListener = Rc<dyn Fn(Option<Principal>)>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    #[error("identity provider is not configured (missing API key)")]
    MissingApiKey,
    #[error("identity provider is not available outside the browser")]
    Unavailable,
    #[error("identity request failed: {0}")]
    Request(String),
    #[error("{message}")]
    Rejected { status: u16, message: String },
    #[error("identity response parse failed: {0}")]
    Parse(String),
}

/// Source of auth-state change notifications.
pub trait IdentityProvider {
    /// Register `listener` for auth-state changes.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider cannot accept listeners.
    fn subscribe(&self, listener: AuthListener) -> Result<Subscription, IdentityError>;
}

/// Handle returned by [`IdentityProvider::subscribe`].
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new<F>(cancel: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        Self { cancel: Some(Box::new(cancel)) }
    }

    /// A subscription with nothing to cancel.
    pub fn noop() -> Self {
        Self { cancel: None }
    }

    /// Stop delivery. Calling this more than once is harmless.
    pub fn unsubscribe(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }

    pub fn is_active(&self) -> bool {
        self.cancel.is_some()
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

// =============================================================================
// LISTENER SET
// =============================================================================

#[derive(Default)]
struct ListenerEntries {
    next_id: u64,
    entries: Vec<(u64, AuthListener)>,
}

/// Ordered listener registry shared by clones.
#[derive(Clone, Default)]
pub struct ListenerSet {
    inner: Rc<RefCell<ListenerEntries>>,
}

impl ListenerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a listener; the returned subscription removes it.
    pub fn add(&self, listener: AuthListener) -> Subscription {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.entries.push((id, listener));
            id
        };
        let weak = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().entries.retain(|(entry_id, _)| *entry_id != id);
            }
        })
    }

    /// Deliver `principal` to every listener in registration order.
    ///
    /// The list is snapshotted first, so listeners may subscribe or
    /// unsubscribe while being notified.
    pub fn emit(&self, principal: Option<&Principal>) {
        let snapshot: Vec<AuthListener> = self
            .inner
            .borrow()
            .entries
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in snapshot {
            listener(principal.cloned());
        }
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().entries.is_empty()
    }
}

// =============================================================================
// STORED SESSION
// =============================================================================

/// Identity session persisted between page loads.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSession {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub id_token: String,
    pub refresh_token: String,
    pub expires_in_secs: u64,
}

impl StoredSession {
    pub fn principal(&self) -> Principal {
        Principal {
            uid: self.uid.clone(),
            email: self.email.clone(),
            display_name: self.display_name.clone(),
            financial_profile: None,
        }
    }
}

/// Identity Toolkit `accounts:*` success body.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthResponse {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    id_token: String,
    refresh_token: String,
    /// Seconds, sent as a decimal string.
    #[serde(default)]
    expires_in: Option<String>,
}

#[cfg(any(test, feature = "hydrate"))]
#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[cfg(any(test, feature = "hydrate"))]
#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

fn endpoint_url(base_url: &str, action: &str, api_key: &str) -> String {
    format!("{base_url}/accounts:{action}?key={api_key}")
}

fn parse_auth_response(body: &str) -> Result<StoredSession, IdentityError> {
    let api: AuthResponse = serde_json::from_str(body).map_err(|e| IdentityError::Parse(e.to_string()))?;
    let expires_in_secs = api
        .expires_in
        .as_deref()
        .and_then(|raw| raw.parse::<u64>().ok())
        .unwrap_or(3600);
    Ok(StoredSession {
        uid: api.local_id,
        email: api.email.filter(|e| !e.is_empty()),
        display_name: api.display_name.filter(|n| !n.is_empty()),
        id_token: api.id_token,
        refresh_token: api.refresh_token,
        expires_in_secs,
    })
}

/// Turn an Identity Toolkit error body into a message fit for a form.
#[cfg(any(test, feature = "hydrate"))]
fn rejection_message(body: &str) -> String {
    let code = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_default();
    // Codes can carry a detail suffix, e.g. "WEAK_PASSWORD : Password should be ...".
    let code = code.split(" : ").next().unwrap_or_default().trim();
    match code {
        "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => {
            "Incorrect email or password.".to_owned()
        }
        "USER_DISABLED" => "This account has been disabled.".to_owned(),
        "EMAIL_EXISTS" => "An account with this email already exists.".to_owned(),
        "WEAK_PASSWORD" => "Password must be at least 6 characters.".to_owned(),
        "INVALID_EMAIL" => "Enter a valid email address.".to_owned(),
        "TOO_MANY_ATTEMPTS_TRY_LATER" => "Too many attempts. Try again later.".to_owned(),
        "" => "Authentication failed.".to_owned(),
        other => format!("Authentication failed ({other})."),
    }
}

// =============================================================================
// FIREBASE ADAPTER
// =============================================================================

/// Identity Toolkit REST adapter. Clones share storage and listeners.
#[derive(Clone)]
pub struct FirebaseIdentity<S> {
    config: IdentityConfig,
    storage: S,
    listeners: ListenerSet,
}

impl<S: KeyValueStorage> FirebaseIdentity<S> {
    pub fn new(config: IdentityConfig, storage: S) -> Self {
        Self { config, storage, listeners: ListenerSet::new() }
    }

    /// Principal for the persisted session, if any. A corrupt record counts
    /// as signed out.
    pub fn current_principal(&self) -> Option<Principal> {
        match load_json::<StoredSession, _>(&self.storage, SESSION_STORAGE_KEY) {
            Ok(session) => session.map(|s| s.principal()),
            Err(e) => {
                leptos::logging::warn!("discarding stored session: {e}");
                self.storage.remove(SESSION_STORAGE_KEY);
                None
            }
        }
    }

    /// Persist `session` and notify listeners of the new principal.
    pub fn establish(&self, session: &StoredSession) -> Principal {
        if let Err(e) = save_json(&self.storage, SESSION_STORAGE_KEY, session) {
            leptos::logging::warn!("session not persisted: {e}");
        }
        let principal = session.principal();
        self.listeners.emit(Some(&principal));
        principal
    }

    /// Clear the persisted session and notify listeners.
    pub fn sign_out(&self) {
        self.storage.remove(SESSION_STORAGE_KEY);
        self.listeners.emit(None);
    }

    /// Sign in with email and password via `accounts:signInWithPassword`.
    ///
    /// # Errors
    ///
    /// Returns an error if the adapter is unconfigured, the request fails, or
    /// the credentials are rejected.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Principal, IdentityError> {
        let payload = serde_json::json!({
            "email": email,
            "password": password,
            "returnSecureToken": true,
        });
        let body = self.post("signInWithPassword", &payload).await?;
        let session = parse_auth_response(&body)?;
        Ok(self.establish(&session))
    }

    /// Create an account via `accounts:signUp`, then set the display name
    /// via `accounts:update` when one is given.
    ///
    /// # Errors
    ///
    /// Returns an error if the adapter is unconfigured, a request fails, or
    /// the registration is rejected.
    pub async fn register(&self, email: &str, password: &str, display_name: &str) -> Result<Principal, IdentityError> {
        let payload = serde_json::json!({
            "email": email,
            "password": password,
            "returnSecureToken": true,
        });
        let body = self.post("signUp", &payload).await?;
        let mut session = parse_auth_response(&body)?;

        let display_name = display_name.trim();
        if !display_name.is_empty() {
            let update = serde_json::json!({
                "idToken": session.id_token,
                "displayName": display_name,
                "returnSecureToken": false,
            });
            match self.post("update", &update).await {
                Ok(_) => session.display_name = Some(display_name.to_owned()),
                // The account exists; a missing display name is not worth failing over.
                Err(e) => leptos::logging::warn!("display name update failed: {e}"),
            }
        }
        Ok(self.establish(&session))
    }

    async fn post(&self, action: &str, payload: &serde_json::Value) -> Result<String, IdentityError> {
        if !self.config.is_configured() {
            return Err(IdentityError::MissingApiKey);
        }
        let url = endpoint_url(&self.config.base_url, action, &self.config.api_key);
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::post(&url)
                .json(payload)
                .map_err(|e| IdentityError::Request(e.to_string()))?
                .send()
                .await
                .map_err(|e| IdentityError::Request(e.to_string()))?;
            let status = resp.status();
            let text = resp
                .text()
                .await
                .map_err(|e| IdentityError::Request(e.to_string()))?;
            if !resp.ok() {
                return Err(IdentityError::Rejected { status, message: rejection_message(&text) });
            }
            Ok(text)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (url, payload);
            Err(IdentityError::Unavailable)
        }
    }
}

impl<S: KeyValueStorage> IdentityProvider for FirebaseIdentity<S> {
    /// Registers `listener` and immediately delivers the current principal,
    /// mirroring how the hosted SDK reports initial state.
    fn subscribe(&self, listener: AuthListener) -> Result<Subscription, IdentityError> {
        if !self.config.is_configured() {
            return Err(IdentityError::MissingApiKey);
        }
        let subscription = self.listeners.add(Rc::clone(&listener));
        listener(self.current_principal());
        Ok(subscription)
    }
}
