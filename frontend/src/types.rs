//! Browser-side file handles.
//!
//! - [`BrowserImage`] - a `File` picked or dropped by the user
//! - [`ObjectUrl`] - `blob:` URL used as the preview, revoked on drop

use catdog::{ImageFile, PreviewError};
use wasm_bindgen::JsValue;
use web_sys::{Blob, File, Url};

/// A file chosen through the picker or dropped on the page.
#[derive(Clone, Debug)]
pub struct BrowserImage(File);

impl BrowserImage {
    pub fn as_file(&self) -> &File {
        &self.0
    }
}

impl From<File> for BrowserImage {
    fn from(file: File) -> Self {
        Self(file)
    }
}

impl ImageFile for BrowserImage {
    type Preview = ObjectUrl;

    fn name(&self) -> String {
        self.0.name()
    }

    /// `File.type`, filled in by the browser from the extension.
    fn mime_type(&self) -> String {
        self.0.type_()
    }

    fn size(&self) -> u64 {
        self.0.size() as u64
    }

    fn create_preview(&self) -> Result<ObjectUrl, PreviewError> {
        ObjectUrl::from_blob(&self.0)
    }
}

/// `URL.createObjectURL` handle. Revoked when dropped, so replacing or
/// resetting the selection never leaks blob URLs.
#[derive(Debug)]
pub struct ObjectUrl(String);

impl ObjectUrl {
    pub fn from_blob(blob: &Blob) -> Result<Self, PreviewError> {
        Url::create_object_url_with_blob(blob)
            .map(Self)
            .map_err(|e| PreviewError(js_error(&e)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Drop for ObjectUrl {
    fn drop(&mut self) {
        if let Err(e) = Url::revoke_object_url(&self.0) {
            log::warn!("Failed to revoke {}: {}", self.0, js_error(&e));
        }
    }
}

/// Readable text for a thrown JS value.
pub fn js_error(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
