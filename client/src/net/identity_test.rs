use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::util::storage::MemoryStorage;

// =============================================================
// Helpers
// =============================================================

fn configured() -> IdentityConfig {
    IdentityConfig { api_key: "test-key".to_owned(), base_url: "https://identity.test/v1".to_owned() }
}

fn session(uid: &str) -> StoredSession {
    StoredSession {
        uid: uid.to_owned(),
        email: Some(format!("{uid}@example.com")),
        display_name: None,
        id_token: "id-token".to_owned(),
        refresh_token: "refresh-token".to_owned(),
        expires_in_secs: 3600,
    }
}

/// Listener that records every delivery as the delivered uid.
fn recorder() -> (AuthListener, Rc<RefCell<Vec<Option<String>>>>) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let listener: AuthListener = Rc::new(move |principal: Option<Principal>| {
        sink.borrow_mut().push(principal.map(|p| p.uid));
    });
    (listener, seen)
}

// =============================================================
// Wire helpers
// =============================================================

#[test]
fn endpoint_url_formats_action_and_key() {
    assert_eq!(
        endpoint_url("https://identity.test/v1", "signInWithPassword", "k"),
        "https://identity.test/v1/accounts:signInWithPassword?key=k"
    );
}

#[test]
fn parse_auth_response_maps_fields() {
    let body = r#"{
        "kind": "identitytoolkit#VerifyPasswordResponse",
        "localId": "u1",
        "email": "ada@example.com",
        "displayName": "",
        "idToken": "tok",
        "refreshToken": "ref",
        "expiresIn": "1800",
        "registered": true
    }"#;
    let parsed = parse_auth_response(body).unwrap();
    assert_eq!(parsed.uid, "u1");
    assert_eq!(parsed.email.as_deref(), Some("ada@example.com"));
    assert_eq!(parsed.display_name, None);
    assert_eq!(parsed.expires_in_secs, 1800);
}

#[test]
fn parse_auth_response_rejects_missing_token() {
    let err = parse_auth_response(r#"{"localId":"u1"}"#).unwrap_err();
    assert!(matches!(err, IdentityError::Parse(_)));
}

#[test]
fn rejection_message_maps_known_codes() {
    assert_eq!(
        rejection_message(r#"{"error":{"code":400,"message":"EMAIL_NOT_FOUND"}}"#),
        "Incorrect email or password."
    );
    assert_eq!(
        rejection_message(r#"{"error":{"code":400,"message":"WEAK_PASSWORD : Password should be at least 6 characters"}}"#),
        "Password must be at least 6 characters."
    );
    assert_eq!(rejection_message(r#"{"error":{"message":"OPERATION_NOT_ALLOWED"}}"#), "Authentication failed (OPERATION_NOT_ALLOWED).");
    assert_eq!(rejection_message("<html>bad gateway</html>"), "Authentication failed.");
}

// =============================================================
// Subscription / ListenerSet
// =============================================================

#[test]
fn unsubscribe_is_idempotent() {
    let calls = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&calls);
    let mut sub = Subscription::new(move || *counter.borrow_mut() += 1);
    assert!(sub.is_active());
    sub.unsubscribe();
    sub.unsubscribe();
    assert!(!sub.is_active());
    assert_eq!(*calls.borrow(), 1);

    let mut noop = Subscription::noop();
    noop.unsubscribe();
}

#[test]
fn listener_set_emits_in_registration_order_and_removes() {
    let order = Rc::new(RefCell::new(Vec::new()));
    let set = ListenerSet::new();

    let first = Rc::clone(&order);
    let mut sub_a = set.add(Rc::new(move |_: Option<Principal>| first.borrow_mut().push("a")));
    let second = Rc::clone(&order);
    let _sub_b = set.add(Rc::new(move |_: Option<Principal>| second.borrow_mut().push("b")));

    set.emit(None);
    sub_a.unsubscribe();
    set.emit(None);

    assert_eq!(*order.borrow(), vec!["a", "b", "b"]);
    assert_eq!(set.len(), 1);
}

#[test]
fn listener_may_unsubscribe_itself_during_emit() {
    let set = ListenerSet::new();
    let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
    let inner_slot = Rc::clone(&slot);
    let sub = set.add(Rc::new(move |_: Option<Principal>| {
        if let Some(mut sub) = inner_slot.borrow_mut().take() {
            sub.unsubscribe();
        }
    }));
    *slot.borrow_mut() = Some(sub);

    set.emit(None);
    assert!(set.is_empty());
}

#[test]
fn subscription_outliving_set_is_harmless() {
    let set = ListenerSet::new();
    let (listener, _) = recorder();
    let mut sub = set.add(listener);
    drop(set);
    sub.unsubscribe();
}

// =============================================================
// FirebaseIdentity
// =============================================================

#[test]
fn subscribe_without_api_key_fails() {
    let identity = FirebaseIdentity::new(IdentityConfig { api_key: String::new(), base_url: String::new() }, MemoryStorage::new());
    let (listener, seen) = recorder();
    let err = identity.subscribe(listener).unwrap_err();
    assert_eq!(err, IdentityError::MissingApiKey);
    assert!(seen.borrow().is_empty());
}

#[test]
fn subscribe_delivers_signed_out_initially() {
    let identity = FirebaseIdentity::new(configured(), MemoryStorage::new());
    let (listener, seen) = recorder();
    let _sub = identity.subscribe(listener).unwrap();
    assert_eq!(*seen.borrow(), vec![None]);
}

#[test]
fn subscribe_delivers_persisted_session() {
    let storage = MemoryStorage::new();
    save_json(&storage, SESSION_STORAGE_KEY, &session("u7")).unwrap();
    let identity = FirebaseIdentity::new(configured(), storage);
    let (listener, seen) = recorder();
    let _sub = identity.subscribe(listener).unwrap();
    assert_eq!(*seen.borrow(), vec![Some("u7".to_owned())]);
}

#[test]
fn corrupt_session_counts_as_signed_out_and_is_cleared() {
    let storage = MemoryStorage::new();
    storage.set(SESSION_STORAGE_KEY, "not json").unwrap();
    let identity = FirebaseIdentity::new(configured(), storage.clone());
    assert!(identity.current_principal().is_none());
    assert!(storage.get(SESSION_STORAGE_KEY).is_none());
}

#[test]
fn establish_and_sign_out_notify_listeners() {
    let storage = MemoryStorage::new();
    let identity = FirebaseIdentity::new(configured(), storage.clone());
    let (listener, seen) = recorder();
    let mut sub = identity.subscribe(listener).unwrap();

    let principal = identity.establish(&session("u1"));
    assert_eq!(principal.uid, "u1");
    assert!(storage.get(SESSION_STORAGE_KEY).is_some());

    identity.sign_out();
    assert!(storage.get(SESSION_STORAGE_KEY).is_none());

    sub.unsubscribe();
    identity.establish(&session("u2"));

    assert_eq!(*seen.borrow(), vec![None, Some("u1".to_owned()), None]);
}

#[test]
fn sign_in_without_api_key_fails_before_network() {
    let identity = FirebaseIdentity::new(IdentityConfig { api_key: " ".to_owned(), base_url: String::new() }, MemoryStorage::new());
    let err = futures::executor::block_on(identity.sign_in("a@b.com", "secret1")).unwrap_err();
    assert_eq!(err, IdentityError::MissingApiKey);
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn sign_in_outside_browser_is_unavailable() {
    let identity = FirebaseIdentity::new(configured(), MemoryStorage::new());
    let err = futures::executor::block_on(identity.register("a@b.com", "secret1", "Ada")).unwrap_err();
    assert_eq!(err, IdentityError::Unavailable);
}
