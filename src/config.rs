//! Settings client configuration resolved at build time.
//!
//! The browser has no process environment, so values come from
//! `option_env!` when the WASM bundle is compiled and fall back to the
//! `DEFAULT_*` constants below.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::error::SettingsError;

pub const DEFAULT_API_BASE: &str = "/api";
pub const DEFAULT_USER_STORAGE_KEY: &str = "user";
pub const DEFAULT_PREFERENCES_KEY: &str = "settings_notification_prefs";
/// Matches the "Max size of 800K" hint shown next to the avatar.
pub const DEFAULT_AVATAR_MAX_BYTES: u64 = 800 * 1024;
pub const DEFAULT_LOG_LEVEL: log::Level = log::Level::Info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsConfig {
    /// Base URL of the profile service, without a trailing slash.
    pub api_base: String,
    /// `localStorage` key holding the serialized signed-in user.
    pub user_storage_key: String,
    /// `localStorage` key holding notification preferences.
    pub preferences_key: String,
    pub avatar_max_bytes: u64,
    pub log_level: log::Level,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_owned(),
            user_storage_key: DEFAULT_USER_STORAGE_KEY.to_owned(),
            preferences_key: DEFAULT_PREFERENCES_KEY.to_owned(),
            avatar_max_bytes: DEFAULT_AVATAR_MAX_BYTES,
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

/// Raw, unparsed configuration values.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawSettings<'a> {
    pub api_base: Option<&'a str>,
    pub user_storage_key: Option<&'a str>,
    pub avatar_max_bytes: Option<&'a str>,
    pub log_level: Option<&'a str>,
}

impl SettingsConfig {
    /// Build config from variables captured when the crate was compiled.
    ///
    /// Optional:
    /// - `SETTINGS_API_BASE`: default `/api`
    /// - `SETTINGS_USER_KEY`: default `user`
    /// - `SETTINGS_AVATAR_MAX_BYTES`: default 819200
    /// - `SETTINGS_LOG_LEVEL`: default `info`
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Config`] if a captured value does not parse.
    pub fn from_build_env() -> Result<Self, SettingsError> {
        Self::from_values(RawSettings {
            api_base: option_env!("SETTINGS_API_BASE"),
            user_storage_key: option_env!("SETTINGS_USER_KEY"),
            avatar_max_bytes: option_env!("SETTINGS_AVATAR_MAX_BYTES"),
            log_level: option_env!("SETTINGS_LOG_LEVEL"),
        })
    }

    /// Parse typed config from optional raw strings.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Config`] for a non-numeric or zero avatar
    /// limit, an unknown log level, or a blank storage key.
    pub fn from_values(raw: RawSettings<'_>) -> Result<Self, SettingsError> {
        let defaults = Self::default();

        let api_base = raw
            .api_base
            .map_or(defaults.api_base, |v| v.trim().trim_end_matches('/').to_owned());

        let user_storage_key = match raw.user_storage_key.map(str::trim) {
            None => defaults.user_storage_key,
            Some("") => return Err(SettingsError::Config("SETTINGS_USER_KEY is blank".to_owned())),
            Some(key) => key.to_owned(),
        };

        let avatar_max_bytes = match raw.avatar_max_bytes {
            None => defaults.avatar_max_bytes,
            Some(v) => parse_avatar_limit(v)?,
        };

        let log_level = match raw.log_level {
            None => defaults.log_level,
            Some(v) => v
                .trim()
                .parse::<log::Level>()
                .map_err(|_| SettingsError::Config(format!("unknown SETTINGS_LOG_LEVEL {v:?}")))?,
        };

        Ok(Self { api_base, user_storage_key, preferences_key: defaults.preferences_key, avatar_max_bytes, log_level })
    }
}

fn parse_avatar_limit(raw: &str) -> Result<u64, SettingsError> {
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(SettingsError::Config("SETTINGS_AVATAR_MAX_BYTES must be positive".to_owned())),
        Ok(n) => Ok(n),
        Err(e) => Err(SettingsError::Config(format!("SETTINGS_AVATAR_MAX_BYTES: {e}"))),
    }
}
