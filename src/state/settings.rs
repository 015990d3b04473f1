//! Settings page coordinator.
//!
//! SYSTEM CONTEXT
//! ==============
//! Ties the profile query, the editable form, the avatar pipeline, and the
//! save dispatcher together:
//!
//! user id -> fetch -> form sync -> edits / avatar staging -> save
//!
//! The page keeps one `SettingsController` in an `RwSignal`. Async work runs
//! outside it and reports back through the `apply_*` methods, so each
//! completion is applied as one atomic update.

#[cfg(test)]
#[path = "settings_test.rs"]
mod settings_test;

use crate::error::SettingsError;
use crate::net::api::ProfileApi;
use crate::net::types::ProfileEntity;
use crate::state::avatar::{AvatarPipeline, AvatarTicket, FileMeta};
use crate::state::profile_form::{FormField, ProfileForm, ProfileFormState};
use crate::state::profile_query::{FetchTicket, ProfileQuery};
use crate::state::save::{PatchRequest, SaveDispatcher};

#[derive(Clone, Debug)]
pub struct SettingsController {
    query: ProfileQuery,
    form: ProfileFormState,
    avatar: AvatarPipeline,
    save: SaveDispatcher,
    avatar_max_bytes: u64,
    avatar_error: Option<SettingsError>,
}

impl SettingsController {
    pub fn new(avatar_max_bytes: u64) -> Self {
        Self {
            query: ProfileQuery::default(),
            form: ProfileFormState::default(),
            avatar: AvatarPipeline::default(),
            save: SaveDispatcher::default(),
            avatar_max_bytes,
            avatar_error: None,
        }
    }

    pub fn query(&self) -> &ProfileQuery {
        &self.query
    }

    pub fn form_state(&self) -> &ProfileFormState {
        &self.form
    }

    pub fn form(&self) -> &ProfileForm {
        &self.form.form
    }

    pub fn preview_url(&self) -> &str {
        &self.form.preview_url
    }

    pub fn save_state(&self) -> &SaveDispatcher {
        &self.save
    }

    pub fn avatar_pending(&self) -> bool {
        self.avatar.is_pending()
    }

    pub fn avatar_error(&self) -> Option<&SettingsError> {
        self.avatar_error.as_ref()
    }

    // =========================================================================
    // Fetch
    // =========================================================================

    /// Follow the signed-in user. Returns a ticket when a fetch must be sent.
    pub fn set_user_id(&mut self, id: Option<String>) -> Option<FetchTicket> {
        let previous = self.query.key().map(str::to_owned);
        let ticket = self.query.set_key(id);
        if self.query.key() != previous.as_deref() {
            // A cache hit switches entities without a request.
            if let Some(entity) = self.query.entity().cloned() {
                self.form.sync(&entity);
            }
        }
        ticket
    }

    /// Apply a fetch outcome; returns whether the form was re-synced.
    pub fn apply_fetch(&mut self, ticket: FetchTicket, result: Result<ProfileEntity, SettingsError>) -> bool {
        match self.query.resolve(ticket, result) {
            Some(entity) => {
                self.form.sync(&entity);
                true
            }
            None => false,
        }
    }

    pub fn retry_fetch(&mut self) -> Option<FetchTicket> {
        self.query.refetch()
    }

    // =========================================================================
    // Edits
    // =========================================================================

    pub fn edit(&mut self, field: FormField, value: String) {
        self.form.edit(field, value);
    }

    // =========================================================================
    // Avatar
    // =========================================================================

    /// Validate a file selection. Returns a ticket when encoding should start.
    pub fn select_avatar(&mut self, files: &[FileMeta]) -> Option<AvatarTicket> {
        match self.avatar.begin(files, self.avatar_max_bytes) {
            Ok(ticket) => {
                if ticket.is_some() {
                    self.avatar_error = None;
                }
                ticket
            }
            Err(e) => {
                self.avatar_error = Some(e);
                None
            }
        }
    }

    /// Stage a finished encode into preview and form together.
    pub fn apply_avatar(&mut self, ticket: &AvatarTicket, result: Result<String, SettingsError>) {
        match result {
            Ok(data_url) => {
                if let Some(data_url) = self.avatar.complete(ticket, data_url) {
                    self.form.stage_avatar(data_url);
                }
            }
            Err(e) => {
                if let Some(e) = self.avatar.fail(ticket, e) {
                    self.avatar_error = Some(e);
                }
            }
        }
    }

    // =========================================================================
    // Save
    // =========================================================================

    /// Start saving the whole form against the last fetched profile id.
    ///
    /// # Errors
    ///
    /// See [`SaveDispatcher::begin`].
    pub fn begin_save(&mut self) -> Result<PatchRequest, SettingsError> {
        let key = self.query.key().unwrap_or_default().to_owned();
        let id = self.query.entity().and_then(|e| e.id.clone());
        self.save.begin(&key, id.as_deref(), &self.form.form)
    }

    /// Apply a save outcome.
    ///
    /// A response naming the saved entity replaces the cached profile and
    /// re-syncs the form. Any other success body is not trusted: the sent
    /// form becomes the synced snapshot and a ticket to refetch the profile
    /// is returned.
    pub fn apply_save(
        &mut self,
        request: &PatchRequest,
        result: Result<ProfileEntity, SettingsError>,
    ) -> Option<FetchTicket> {
        let response = self.save.finish(request.request_id, result)?;
        if request.is_echo(&response) {
            if let Some(entity) = self.query.store(&request.key, response) {
                self.form.sync(&entity);
            }
            return None;
        }

        log::debug!("save response for {} carries no profile; refetching", request.id);
        if self.query.key() == Some(request.key.as_str()) {
            self.form.accept(&request.data);
        }
        self.query.invalidate(&request.key)
    }

    /// Drop in-progress avatar work when the page goes away.
    pub fn teardown(&mut self) {
        self.avatar.cancel();
    }
}

/// Run `ticket` against `api`.
///
/// # Errors
///
/// Whatever the service returns.
pub async fn fetch_profile<A: ProfileApi>(api: &A, ticket: &FetchTicket) -> Result<ProfileEntity, SettingsError> {
    api.fetch_profile(&ticket.id).await
}

/// Send `request` to `api`.
///
/// # Errors
///
/// Whatever the service returns.
pub async fn submit_patch<A: ProfileApi>(api: &A, request: &PatchRequest) -> Result<ProfileEntity, SettingsError> {
    api.patch_profile(&request.id, &request.data).await
}
