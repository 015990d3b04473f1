//! REST access to the customer profile service.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning [`SettingsError::Unavailable`] since
//! these endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Result` outputs instead of panics so fetch and save failures
//! degrade into visible page state without crashing hydration.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::ProfileEntity;
use crate::error::SettingsError;
use crate::state::profile_form::ProfileForm;

/// Remote profile service used by the settings flow.
///
/// The page talks to [`HttpProfileApi`]; tests substitute an in-memory fake.
#[allow(async_fn_in_trait)]
pub trait ProfileApi {
    /// Retrieve the profile for `id`.
    async fn fetch_profile(&self, id: &str) -> Result<ProfileEntity, SettingsError>;

    /// Send every form field as a partial update of profile `id`.
    async fn patch_profile(&self, id: &str, form: &ProfileForm) -> Result<ProfileEntity, SettingsError>;
}

/// HTTP implementation rooted at `api_base` (e.g. `/api`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpProfileApi {
    api_base: String,
}

impl HttpProfileApi {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self { api_base: api_base.into() }
    }
}

/// `{api_base}/customers/{id}` with `id` percent-encoded as one path segment.
fn customer_endpoint(api_base: &str, id: &str) -> String {
    format!("{}/customers/{}", api_base.trim_end_matches('/'), urlencoding::encode(id))
}

#[cfg(feature = "hydrate")]
async fn read_profile(resp: gloo_net::http::Response) -> Result<ProfileEntity, SettingsError> {
    if !resp.ok() {
        return Err(SettingsError::Status { status: resp.status() });
    }
    resp.json::<ProfileEntity>()
        .await
        .map_err(|e| SettingsError::Decode(e.to_string()))
}

impl ProfileApi for HttpProfileApi {
    async fn fetch_profile(&self, id: &str) -> Result<ProfileEntity, SettingsError> {
        #[cfg(feature = "hydrate")]
        {
            let url = customer_endpoint(&self.api_base, id);
            let resp = gloo_net::http::Request::get(&url)
                .send()
                .await
                .map_err(|e| SettingsError::Transport(e.to_string()))?;
            read_profile(resp).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = customer_endpoint(&self.api_base, id);
            Err(SettingsError::Unavailable)
        }
    }

    async fn patch_profile(&self, id: &str, form: &ProfileForm) -> Result<ProfileEntity, SettingsError> {
        #[cfg(feature = "hydrate")]
        {
            let url = customer_endpoint(&self.api_base, id);
            let resp = gloo_net::http::Request::patch(&url)
                .json(form)
                .map_err(|e| SettingsError::Transport(e.to_string()))?
                .send()
                .await
                .map_err(|e| SettingsError::Transport(e.to_string()))?;
            read_profile(resp).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (customer_endpoint(&self.api_base, id), form);
            Err(SettingsError::Unavailable)
        }
    }
}
