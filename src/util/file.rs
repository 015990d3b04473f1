//! Browser file-input glue for the avatar picker.
//!
//! Requires a browser environment; outside `hydrate` only the pure helpers
//! are compiled.

#[cfg(test)]
#[path = "file_test.rs"]
mod file_test;

#[cfg(feature = "hydrate")]
use crate::error::SettingsError;
#[cfg(feature = "hydrate")]
use crate::state::avatar::{FileMeta, encode_data_url};

/// Convert a JS `Blob.size` to bytes. Non-finite or negative values map to 0.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn size_from_js(size: f64) -> u64 {
    if size.is_finite() && size > 0.0 { size as u64 } else { 0 }
}

/// Files currently selected in `input`, in selection order.
#[cfg(feature = "hydrate")]
pub fn selected_files(input: &web_sys::HtmlInputElement) -> Vec<web_sys::File> {
    let Some(list) = input.files() else {
        return Vec::new();
    };
    (0..list.length()).filter_map(|i| list.get(i)).collect()
}

#[cfg(feature = "hydrate")]
pub fn file_meta(file: &web_sys::File) -> FileMeta {
    FileMeta { name: file.name(), mime: file.type_(), size: size_from_js(file.size()) }
}

/// Read the whole file and encode it as a `data:` URL.
///
/// # Errors
///
/// Returns [`SettingsError::FileRead`] if the browser fails to read the blob.
#[cfg(feature = "hydrate")]
pub async fn read_data_url(file: &web_sys::File, mime: &str) -> Result<String, SettingsError> {
    let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| SettingsError::FileRead(format!("{e:?}")))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    Ok(encode_data_url(mime, &bytes))
}
