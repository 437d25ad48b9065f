//! File handles the form can select.

use crate::error::PreviewError;

/// A user-chosen file, as seen by the form.
///
/// Implementations are cheap handles: cloning must not copy the image
/// data more than the platform already does (a `web_sys::File` clone is a
/// reference bump, a local image shares its bytes).
pub trait ImageFile: Clone {
    /// Displayable stand-in for the file. Dropping it releases whatever
    /// the platform allocated for it.
    type Preview;

    fn name(&self) -> String;

    /// Declared MIME type, e.g. `image/png`.
    fn mime_type(&self) -> String;

    /// Size in bytes.
    fn size(&self) -> u64;

    fn create_preview(&self) -> Result<Self::Preview, PreviewError>;

    fn is_image(&self) -> bool {
        self.mime_type().starts_with("image/")
    }
}
