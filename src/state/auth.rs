//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! The signed-in user is written to local storage by the login flow. This
//! module reads it back exactly once per store, exposes it to every page via
//! Leptos context, and lets other code flip the authenticated flag or swap the
//! user record. Nothing here writes back to storage.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;

use crate::error::SettingsError;
use crate::net::types::UserRecord;
use crate::util::storage::{KeyValueStorage, load_json};

/// Authentication flag and current user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub authenticated: bool,
    pub current_user: Option<UserRecord>,
    initialized: bool,
}

impl AuthState {
    /// Read the stored user under `key` the first time this is called.
    ///
    /// Absent or malformed entries leave `current_user` empty. Returns `false`
    /// without touching storage when the state was already initialized.
    pub fn initialize(&mut self, storage: &impl KeyValueStorage, key: &str) -> bool {
        if self.initialized {
            return false;
        }
        self.initialized = true;
        // JSON `null` is a valid stored value meaning "signed out".
        self.current_user = load_json::<Option<UserRecord>>(storage, key)
            .flatten()
            .map(UserRecord::validated);
        log::debug!("auth initialized: user present = {}", self.current_user.is_some());
        true
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn set_authenticated(&mut self, value: bool) {
        self.authenticated = value;
    }

    pub fn set_current_user(&mut self, value: Option<UserRecord>) {
        self.current_user = value;
    }

    /// Profile id of the current user, if one is known.
    pub fn user_id(&self) -> Option<&str> {
        self.current_user.as_ref()?.id.as_deref()
    }
}

/// Reactive handle to [`AuthState`] shared through context.
#[derive(Clone, Copy, Debug)]
pub struct AuthStore(RwSignal<AuthState>);

impl AuthStore {
    pub fn new() -> Self {
        Self(RwSignal::new(AuthState::default()))
    }

    /// Install this store as the context value for descendants.
    pub fn provide(self) {
        provide_context(self);
    }

    /// Run the one-time storage read. Later calls are no-ops.
    pub fn initialize(self, storage: &impl KeyValueStorage, key: &str) {
        self.0.update(|s| {
            s.initialize(storage, key);
        });
    }

    pub fn authenticated(self) -> bool {
        self.0.with(|s| s.authenticated)
    }

    pub fn current_user(self) -> Option<UserRecord> {
        self.0.with(|s| s.current_user.clone())
    }

    /// Tracked read of the current user id.
    pub fn user_id(self) -> Option<String> {
        self.0.with(|s| s.user_id().map(str::to_owned))
    }

    pub fn set_authenticated(self, value: bool) {
        self.0.update(|s| s.set_authenticated(value));
    }

    pub fn set_current_user(self, value: Option<UserRecord>) {
        self.0.update(|s| s.set_current_user(value));
    }
}

impl Default for AuthStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Fetch the [`AuthStore`] provided by an ancestor [`AuthProvider`].
///
/// # Errors
///
/// Returns [`SettingsError::OutsideProvider`] when called with no provider
/// above the current component.
pub fn use_auth() -> Result<AuthStore, SettingsError> {
    use_context::<AuthStore>().ok_or(SettingsError::OutsideProvider("AuthStore"))
}

/// Provides an [`AuthStore`] and loads the stored user once on mount.
#[component]
pub fn AuthProvider(
    /// `localStorage` key of the serialized user.
    #[prop(into)]
    storage_key: String,
    children: Children,
) -> impl IntoView {
    let store = AuthStore::new();
    store.provide();

    // Effects only run in the browser, so SSR renders the signed-out state and
    // hydration picks up the stored user.
    Effect::new(move |_| {
        store.initialize(&crate::util::storage::BrowserStorage, &storage_key);
    });

    children()
}
