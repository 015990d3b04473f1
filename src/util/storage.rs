//! Key/value storage seam over browser `localStorage`.
//!
//! SYSTEM CONTEXT
//! ==============
//! The auth store reads the signed-in user once at startup and the settings
//! page persists notification preferences. Both go through
//! [`KeyValueStorage`] so state code stays testable without a browser.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::cell::RefCell;
use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Minimal string store with `localStorage` semantics.
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str);
}

/// `window.localStorage`; every call no-ops outside the browser.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl KeyValueStorage for BrowserStorage {
    fn get_item(&self, key: &str) -> Option<String> {
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

    fn set_item(&self, key: &str, value: &str) {
        #[cfg(feature = "hydrate")]
        {
            let Some(storage) = local_storage() else {
                return;
            };
            if storage.set_item(key, value).is_err() {
                log::warn!("localStorage write failed for {key}");
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (key, value);
        }
    }
}

/// In-memory storage for tests and server rendering.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn with_item(key: &str, value: &str) -> Self {
        let storage = Self::default();
        storage.set_item(key, value);
        storage
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        self.items.borrow_mut().insert(key.to_owned(), value.to_owned());
    }
}

/// Load a JSON value stored under `key`. Absent or malformed entries yield `None`.
pub fn load_json<T: DeserializeOwned>(storage: &impl KeyValueStorage, key: &str) -> Option<T> {
    let raw = storage.get_item(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            log::debug!("ignoring malformed storage entry {key}: {e}");
            None
        }
    }
}

/// Save a JSON value under `key`.
pub fn save_json<T: Serialize>(storage: &impl KeyValueStorage, key: &str, value: &T) {
    let Ok(raw) = serde_json::to_string(value) else {
        return;
    };
    storage.set_item(key, &raw);
}
