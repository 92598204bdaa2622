//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! `SessionGate` is the single source of truth for who is signed in. It
//! subscribes to the identity provider, merges the cached financial profile
//! into each delivered principal, and publishes `SessionState` to observers.
//! The app root mirrors that state into a signal read by route guards and
//! pages.
//!
//! ERROR HANDLING
//! ==============
//! Nothing here fails outward. A registration error publishes "signed out";
//! cache read, parse, and write errors are logged and the bare principal is
//! delivered instead.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::net::identity::{AuthListener, IdentityProvider, Subscription};
use crate::net::types::{FinancialProfile, Principal};
use crate::util::storage::{KeyValueStorage, PRINCIPAL_CACHE_KEY, PROFILE_CACHE_KEY, load_json, save_json};

/// Authentication state tracking the current principal and loading status.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionState {
    pub principal: Option<Principal>,
    /// True until the first auth-state notification has been handled.
    pub loading: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self { principal: None, loading: true }
    }
}

impl SessionState {
    pub fn signed_in(principal: Principal) -> Self {
        Self { principal: Some(principal), loading: false }
    }

    pub fn signed_out() -> Self {
        Self { principal: None, loading: false }
    }

    pub fn is_authenticated(&self) -> bool {
        self.principal.is_some()
    }
}

/// Where the gate is running. Only a browser gets an identity subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    Browser,
    Server,
}

impl Environment {
    pub fn detect() -> Self {
        #[cfg(feature = "hydrate")]
        {
            if web_sys::window().is_some() {
                return Self::Browser;
            }
        }
        Self::Server
    }
}

type Observer = Rc<dyn Fn(&SessionState)>;

struct GateCore<S> {
    storage: S,
    state: RefCell<SessionState>,
    observers: RefCell<Vec<Observer>>,
    alive: Cell<bool>,
}

impl<S: KeyValueStorage> GateCore<S> {
    fn publish(&self, next: SessionState) {
        *self.state.borrow_mut() = next;
        let snapshot = self.state.borrow().clone();
        // Observers may register further observers while being notified.
        let observers: Vec<Observer> = self.observers.borrow().iter().map(Rc::clone).collect();
        for observer in observers {
            observer(&snapshot);
        }
    }

    fn on_auth_change(&self, raw: Option<Principal>) {
        if !self.alive.get() {
            return;
        }
        let next = match raw {
            Some(principal) => SessionState::signed_in(self.enrich(principal)),
            None => SessionState::signed_out(),
        };
        self.publish(next);
    }

    /// Attach the cached profile, then cache the merged principal.
    fn enrich(&self, mut principal: Principal) -> Principal {
        match load_json::<FinancialProfile, _>(&self.storage, PROFILE_CACHE_KEY) {
            Ok(Some(profile)) => {
                principal.financial_profile = Some(profile);
                if let Err(e) = save_json(&self.storage, PRINCIPAL_CACHE_KEY, &principal) {
                    leptos::logging::warn!("principal cache write skipped: {e}");
                }
            }
            Ok(None) => {}
            Err(e) => leptos::logging::warn!("cached profile ignored: {e}"),
        }
        principal
    }
}

/// Observable session container fed by an identity provider.
pub struct SessionGate<I, S> {
    identity: I,
    core: Rc<GateCore<S>>,
    subscription: RefCell<Option<Subscription>>,
}

impl<I, S> SessionGate<I, S>
where
    I: IdentityProvider,
    S: KeyValueStorage + 'static,
{
    pub fn new(identity: I, storage: S) -> Self {
        Self {
            identity,
            core: Rc::new(GateCore {
                storage,
                state: RefCell::new(SessionState::default()),
                observers: RefCell::new(Vec::new()),
                alive: Cell::new(true),
            }),
            subscription: RefCell::new(None),
        }
    }

    /// Current session snapshot.
    pub fn state(&self) -> SessionState {
        self.core.state.borrow().clone()
    }

    /// Register a callback run after every state transition.
    pub fn observe<F>(&self, observer: F)
    where
        F: Fn(&SessionState) + 'static,
    {
        self.core.observers.borrow_mut().push(Rc::new(observer));
    }

    /// Subscribe to the identity provider.
    ///
    /// On the server this does nothing and the state stays loading. A second
    /// call while subscribed, or any call after teardown, is ignored.
    pub fn initialize(&self, environment: Environment) {
        if environment == Environment::Server {
            return;
        }
        if !self.core.alive.get() || self.subscription.borrow().is_some() {
            return;
        }

        let weak = Rc::downgrade(&self.core);
        let listener: AuthListener = Rc::new(move |raw: Option<Principal>| {
            if let Some(core) = weak.upgrade() {
                core.on_auth_change(raw);
            }
        });

        match self.identity.subscribe(listener) {
            Ok(subscription) => *self.subscription.borrow_mut() = Some(subscription),
            Err(e) => {
                leptos::logging::warn!("auth listener registration failed: {e}");
                if self.core.alive.get() {
                    self.core.publish(SessionState::signed_out());
                }
            }
        }
    }

    /// Stop listening. Safe to call repeatedly or before `initialize`.
    pub fn teardown(&self) {
        self.core.alive.set(false);
        if let Some(mut subscription) = self.subscription.borrow_mut().take() {
            subscription.unsubscribe();
        }
    }

    pub fn is_active(&self) -> bool {
        self.core.alive.get()
    }
}

impl<I, S> Drop for SessionGate<I, S> {
    fn drop(&mut self) {
        self.core.alive.set(false);
        if let Some(mut subscription) = self.subscription.get_mut().take() {
            subscription.unsubscribe();
        }
    }
}
