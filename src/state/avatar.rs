//! Avatar selection, validation, and stale-completion guarding.
//!
//! Reading a file is asynchronous and cannot be interrupted, so every
//! selection takes a fresh token. Only the completion carrying the newest
//! token is staged; anything older, or anything finishing after `cancel`,
//! is dropped.

#[cfg(test)]
#[path = "avatar_test.rs"]
mod avatar_test;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::error::SettingsError;

/// Metadata of one picked file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileMeta {
    pub name: String,
    /// MIME type reported by the browser; empty when unknown.
    pub mime: String,
    pub size: u64,
}

/// Handle for one in-progress encode.
#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use]
pub struct AvatarTicket {
    pub token: u64,
    pub mime: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AvatarPipeline {
    latest: u64,
    pending: bool,
}

impl AvatarPipeline {
    /// Start handling a selection. Only the first file is considered.
    ///
    /// Returns `Ok(None)` for an empty selection, which leaves any pending
    /// encode alone.
    ///
    /// # Errors
    ///
    /// Rejects non-image files and files over `max_bytes`. A rejected
    /// selection still supersedes any earlier pending encode.
    pub fn begin(&mut self, files: &[FileMeta], max_bytes: u64) -> Result<Option<AvatarTicket>, SettingsError> {
        let Some(file) = files.first() else {
            return Ok(None);
        };
        self.latest += 1;
        self.pending = false;
        validate_avatar(file, max_bytes)?;

        self.pending = true;
        log::debug!("encoding avatar {} ({} bytes), token {}", file.name, file.size, self.latest);
        Ok(Some(AvatarTicket { token: self.latest, mime: file.mime.clone() }))
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    fn finish(&mut self, ticket: &AvatarTicket) -> bool {
        if ticket.token != self.latest || !self.pending {
            log::debug!("dropping stale avatar encode {}", ticket.token);
            return false;
        }
        self.pending = false;
        true
    }

    /// Accept an encoded value if `ticket` is still the newest selection.
    pub fn complete(&mut self, ticket: &AvatarTicket, data_url: String) -> Option<String> {
        self.finish(ticket).then_some(data_url)
    }

    /// Accept a read failure if `ticket` is still the newest selection.
    pub fn fail(&mut self, ticket: &AvatarTicket, error: SettingsError) -> Option<SettingsError> {
        self.finish(ticket).then_some(error)
    }

    /// Invalidate every outstanding ticket.
    pub fn cancel(&mut self) {
        self.latest += 1;
        self.pending = false;
    }
}

/// Check type and size of a picked file.
///
/// # Errors
///
/// [`SettingsError::AvatarNotImage`] or [`SettingsError::AvatarTooLarge`].
pub fn validate_avatar(file: &FileMeta, max_bytes: u64) -> Result<(), SettingsError> {
    if !file.mime.starts_with("image/") {
        return Err(SettingsError::AvatarNotImage { mime: file.mime.clone() });
    }
    if file.size > max_bytes {
        return Err(SettingsError::AvatarTooLarge { size: file.size, max: max_bytes });
    }
    Ok(())
}

/// Encode file contents as a `data:` URL, as `FileReader.readAsDataURL` would.
pub fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
    let mime = if mime.is_empty() { "application/octet-stream" } else { mime };
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}
