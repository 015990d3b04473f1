//! Error type shared by settings state, network, and browser helpers.
//!
//! ERROR HANDLING
//! ==============
//! Every failure the settings flow can hit is local to the operation that
//! triggered it and recoverable by user retry. Errors are `Clone` so they can
//! sit inside reactive UI state and be rendered more than once.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Failures surfaced by the settings page and its collaborators.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// A context accessor ran without its provider mounted above it.
    #[error("{0} used outside provider")]
    OutsideProvider(&'static str),

    /// Save was invoked before any profile id was known.
    #[error("profile id missing; reload the page before saving")]
    MissingEntityId,

    /// A save request is already in flight.
    #[error("save already in progress")]
    SaveInFlight,

    /// Selected avatar exceeds the configured size limit.
    #[error("avatar is {size} bytes; max is {max}")]
    AvatarTooLarge { size: u64, max: u64 },

    /// Selected avatar is not an image.
    #[error("avatar must be an image, got {mime:?}")]
    AvatarNotImage { mime: String },

    /// The browser could not read the selected file.
    #[error("file read failed: {0}")]
    FileRead(String),

    /// The profile service returned a non-success HTTP status.
    #[error("request failed: {status}")]
    Status { status: u16 },

    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body could not be deserialized.
    #[error("response parse failed: {0}")]
    Decode(String),

    /// Browser-only operation invoked during server rendering.
    #[error("not available on server")]
    Unavailable,

    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    Config(String),
}

impl SettingsError {
    /// Stable machine-readable code for logs and `data-error` attributes.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::OutsideProvider(_) => "E_OUTSIDE_PROVIDER",
            Self::MissingEntityId => "E_MISSING_ENTITY_ID",
            Self::SaveInFlight => "E_SAVE_IN_FLIGHT",
            Self::AvatarTooLarge { .. } => "E_AVATAR_TOO_LARGE",
            Self::AvatarNotImage { .. } => "E_AVATAR_NOT_IMAGE",
            Self::FileRead(_) => "E_FILE_READ",
            Self::Status { .. } => "E_STATUS",
            Self::Transport(_) => "E_TRANSPORT",
            Self::Decode(_) => "E_DECODE",
            Self::Unavailable => "E_UNAVAILABLE",
            Self::Config(_) => "E_CONFIG",
        }
    }

    /// Whether re-invoking the same operation can plausibly succeed.
    pub fn retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Status { status: 408 | 429 | 500..=599 })
    }
}
