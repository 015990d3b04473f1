//! Wire DTOs for the profile service and the stored user record.
//!
//! DESIGN
//! ======
//! The service owns the profile schema and is loose about it: every field may
//! be missing or `null`, ids arrive as strings or numbers, and older records
//! carry `imgUrl` instead of `img_url`. These types accept all of that so the
//! form projection can decide the fallbacks in one place.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Signed-in user as persisted in local storage at login.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserRecord {
    /// Profile id used to fetch the customer record.
    #[serde(deserialize_with = "deserialize_optional_id")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
}

impl UserRecord {
    /// Normalize a record read from storage: a blank id counts as absent.
    #[must_use]
    pub fn validated(mut self) -> Self {
        self.id = normalize_id(self.id);
        self
    }
}

/// Remote-owned customer profile.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileEntity {
    #[serde(deserialize_with = "deserialize_optional_id")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub location: Option<String>,
    pub img_url: Option<String>,
    /// Camel-case avatar field written by older service versions.
    #[serde(rename = "imgUrl")]
    pub legacy_img_url: Option<String>,
    pub role: Option<String>,
    #[serde(rename = "verificationStatus")]
    pub verification_status: Option<String>,
}

impl ProfileEntity {
    /// Avatar URL, preferring `img_url` and falling back to `imgUrl`.
    /// Empty strings count as absent.
    pub fn avatar_url(&self) -> Option<&str> {
        non_empty(self.img_url.as_deref()).or_else(|| non_empty(self.legacy_img_url.as_deref()))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

pub(crate) fn normalize_id(id: Option<String>) -> Option<String> {
    id.map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
}

fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(serde_json::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(D::Error::custom(format!("expected string or number id, got {other}"))),
    }
}
