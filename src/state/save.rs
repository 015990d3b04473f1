//! Guarded dispatch of profile saves.
//!
//! A save always resends every form field. Only one save may be in flight;
//! the button is disabled meanwhile and a second dispatch is rejected here as
//! well. Saving without a known profile id fails before any request is built.

#[cfg(test)]
#[path = "save_test.rs"]
mod save_test;

use uuid::Uuid;

use crate::error::SettingsError;
use crate::net::types::ProfileEntity;
use crate::state::profile_form::ProfileForm;

/// One outgoing partial update.
#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use]
pub struct PatchRequest {
    pub request_id: Uuid,
    /// Query key (user id) the profile was fetched under.
    pub key: String,
    /// Profile entity id the PATCH is addressed to.
    pub id: String,
    pub data: ProfileForm,
}

impl PatchRequest {
    /// Whether `response` describes the entity this request updated.
    /// Bodies without a matching id (acks, envelopes) do not.
    pub fn is_echo(&self, response: &ProfileEntity) -> bool {
        response.id.as_deref().map(str::trim) == Some(self.id.as_str())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SaveDispatcher {
    in_flight: Option<Uuid>,
    last_error: Option<SettingsError>,
    saved: u64,
}

impl SaveDispatcher {
    pub fn in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn last_error(&self) -> Option<&SettingsError> {
        self.last_error.as_ref()
    }

    /// Number of saves that completed successfully.
    pub fn saved_count(&self) -> u64 {
        self.saved
    }

    /// Build a request carrying the full `form` for profile `entity_id`,
    /// fetched under query `key`.
    ///
    /// # Errors
    ///
    /// [`SettingsError::MissingEntityId`] when the id is absent or blank;
    /// [`SettingsError::SaveInFlight`] while an earlier save is unfinished.
    pub fn begin(
        &mut self,
        key: &str,
        entity_id: Option<&str>,
        form: &ProfileForm,
    ) -> Result<PatchRequest, SettingsError> {
        if self.in_flight.is_some() {
            return Err(SettingsError::SaveInFlight);
        }
        let Some(id) = entity_id.map(str::trim).filter(|id| !id.is_empty()) else {
            self.last_error = Some(SettingsError::MissingEntityId);
            return Err(SettingsError::MissingEntityId);
        };

        let request_id = Uuid::new_v4();
        self.in_flight = Some(request_id);
        self.last_error = None;
        log::info!("saving profile {id} (request {request_id})");
        Ok(PatchRequest { request_id, key: key.to_owned(), id: id.to_owned(), data: form.clone() })
    }

    /// Record the outcome of `request_id`.
    ///
    /// Returns the server's updated entity on success. Outcomes for a request
    /// that is not the one in flight are ignored.
    pub fn finish(
        &mut self,
        request_id: Uuid,
        result: Result<ProfileEntity, SettingsError>,
    ) -> Option<ProfileEntity> {
        if self.in_flight != Some(request_id) {
            log::debug!("ignoring outcome of unknown save {request_id}");
            return None;
        }
        self.in_flight = None;
        match result {
            Ok(entity) => {
                self.saved += 1;
                Some(entity)
            }
            Err(e) => {
                log::warn!("save {request_id} failed: {e}");
                self.last_error = Some(e);
                None
            }
        }
    }
}
