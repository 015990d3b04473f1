//! Keyed fetch state for the current user's profile.
//!
//! DESIGN
//! ======
//! Mirrors a query cache with a single key: the fetch is disabled while the
//! id is absent, one request is issued per distinct id, and results are
//! cached by id. Responses for an id that is no longer current are cached but
//! do not change the visible status.

#[cfg(test)]
#[path = "profile_query_test.rs"]
mod profile_query_test;

use std::collections::{HashMap, HashSet};

use crate::error::SettingsError;
use crate::net::types::{ProfileEntity, normalize_id};

/// Visible state of the profile fetch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum QueryStatus {
    /// No id yet; nothing has been requested.
    #[default]
    Disabled,
    Loading,
    Error(SettingsError),
    Success(ProfileEntity),
}

/// Permission to issue one fetch for `id`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use]
pub struct FetchTicket {
    pub id: String,
}

#[derive(Clone, Debug, Default)]
pub struct ProfileQuery {
    key: Option<String>,
    status: QueryStatus,
    cache: HashMap<String, ProfileEntity>,
    in_flight: HashSet<String>,
}

impl ProfileQuery {
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn status(&self) -> &QueryStatus {
        &self.status
    }

    /// True while there is no data to show yet, including the disabled state.
    pub fn is_loading(&self) -> bool {
        matches!(self.status, QueryStatus::Disabled | QueryStatus::Loading)
    }

    pub fn error(&self) -> Option<&SettingsError> {
        match &self.status {
            QueryStatus::Error(e) => Some(e),
            _ => None,
        }
    }

    /// Entity currently displayed, if the last fetch for this key succeeded.
    pub fn entity(&self) -> Option<&ProfileEntity> {
        match &self.status {
            QueryStatus::Success(entity) => Some(entity),
            _ => None,
        }
    }

    /// Point the query at `id`.
    ///
    /// Returns a ticket only when a request must actually be sent. A cached id
    /// switches straight to `Success`; an unchanged id is a no-op.
    pub fn set_key(&mut self, id: Option<String>) -> Option<FetchTicket> {
        let id = normalize_id(id);
        if id == self.key {
            return None;
        }
        self.key.clone_from(&id);

        let Some(id) = id else {
            self.status = QueryStatus::Disabled;
            return None;
        };
        if let Some(entity) = self.cache.get(&id) {
            self.status = QueryStatus::Success(entity.clone());
            return None;
        }
        self.status = QueryStatus::Loading;
        self.issue(id)
    }

    /// Re-issue the fetch for the current key after a failure.
    pub fn refetch(&mut self) -> Option<FetchTicket> {
        let id = self.key.clone()?;
        if !matches!(self.status, QueryStatus::Error(_)) {
            return None;
        }
        self.status = QueryStatus::Loading;
        self.issue(id)
    }

    fn issue(&mut self, id: String) -> Option<FetchTicket> {
        if !self.in_flight.insert(id.clone()) {
            return None;
        }
        log::debug!("fetching profile {id}");
        Some(FetchTicket { id })
    }

    /// Record the outcome of `ticket`.
    ///
    /// Returns the entity when it should be synced into the form, i.e. the
    /// fetch succeeded and its id is still the current key.
    pub fn resolve(
        &mut self,
        ticket: FetchTicket,
        result: Result<ProfileEntity, SettingsError>,
    ) -> Option<ProfileEntity> {
        self.in_flight.remove(&ticket.id);
        let current = self.key.as_deref() == Some(ticket.id.as_str());

        match result {
            Ok(entity) => {
                self.cache.insert(ticket.id, entity.clone());
                if !current {
                    return None;
                }
                self.status = QueryStatus::Success(entity.clone());
                Some(entity)
            }
            Err(e) => {
                log::warn!("profile fetch for {} failed: {e}", ticket.id);
                if current {
                    self.status = QueryStatus::Error(e);
                }
                None
            }
        }
    }

    /// Replace the cached entity for `id`, e.g. with a save response.
    ///
    /// Returns the entity when `id` is the current key.
    pub fn store(&mut self, id: &str, entity: ProfileEntity) -> Option<ProfileEntity> {
        self.cache.insert(id.to_owned(), entity.clone());
        if self.key.as_deref() != Some(id) {
            return None;
        }
        self.status = QueryStatus::Success(entity.clone());
        Some(entity)
    }

    /// Drop the cached entity for `id` and refetch it if it is current.
    ///
    /// The visible status is kept, so the page stays on the loaded profile
    /// until the fresh copy arrives.
    pub fn invalidate(&mut self, id: &str) -> Option<FetchTicket> {
        self.cache.remove(id);
        if self.key.as_deref() != Some(id) {
            return None;
        }
        self.issue(id.to_owned())
    }
}
