//! Key-value storage boundary backed by browser `localStorage`.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session gate and the identity adapter read and write small JSON blobs
//! through `KeyValueStorage` so they can run against an in-memory store in
//! tests and during SSR, where no browser storage exists.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Cached onboarding profile, written by the profile flow.
pub const PROFILE_CACHE_KEY: &str = "finassist.financial_profile";
/// Principal merged with its cached profile, written by the session gate.
pub const PRINCIPAL_CACHE_KEY: &str = "finassist.principal";
/// Identity-provider session (tokens + uid).
pub const SESSION_STORAGE_KEY: &str = "finassist.session";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage unavailable")]
    Unavailable,
    #[error("storage write failed for {key}: {reason}")]
    Write { key: String, reason: String },
    #[error("stored value for {key} is malformed: {reason}")]
    Decode { key: String, reason: String },
    #[error("value for {key} could not be encoded: {reason}")]
    Encode { key: String, reason: String },
}

/// Synchronous string key-value store.
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Option<String>;

    /// # Errors
    ///
    /// Returns an error if the backing store rejects the write (quota, privacy
    /// mode, or no store at all).
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&self, key: &str);
}

/// Load and decode a JSON value stored under `key`.
///
/// Absent keys are `Ok(None)`; present but unparsable values are errors.
///
/// # Errors
///
/// Returns [`StorageError::Decode`] when the stored text is not valid JSON for `T`.
pub fn load_json<T, S>(storage: &S, key: &str) -> Result<Option<T>, StorageError>
where
    T: DeserializeOwned,
    S: KeyValueStorage + ?Sized,
{
    let Some(raw) = storage.get(key) else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| StorageError::Decode { key: key.to_owned(), reason: e.to_string() })
}

/// Encode `value` as JSON and store it under `key`.
///
/// # Errors
///
/// Returns an error if encoding fails or the store rejects the write.
pub fn save_json<T, S>(storage: &S, key: &str, value: &T) -> Result<(), StorageError>
where
    T: Serialize,
    S: KeyValueStorage + ?Sized,
{
    let raw =
        serde_json::to_string(value).map_err(|e| StorageError::Encode { key: key.to_owned(), reason: e.to_string() })?;
    storage.set(key, &raw)
}

// =============================================================================
// BROWSER STORAGE
// =============================================================================

/// `window.localStorage`. Outside the browser reads are absent and writes fail.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl KeyValueStorage for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            None
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        #[cfg(feature = "hydrate")]
        {
            let storage = local_storage().ok_or(StorageError::Unavailable)?;
            storage
                .set_item(key, value)
                .map_err(|e| StorageError::Write { key: key.to_owned(), reason: format!("{e:?}") })
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (key, value);
            Err(StorageError::Unavailable)
        }
    }

    fn remove(&self, key: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.remove_item(key);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
        }
    }
}

// =============================================================================
// MEMORY STORAGE
// =============================================================================

/// In-process store; clones share the same map.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}
