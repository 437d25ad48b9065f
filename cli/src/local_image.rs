//! Images read from disk.
//!
//! The declared MIME type follows the file extension, the way a browser
//! fills in `File.type`. Content sniffing is only a fallback for files
//! without a recognised extension.

use std::fmt;
use std::fs;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use catdog::{ImageFile, PreviewError};
use image::{ImageFormat, ImageReader};

use crate::error::CliResult;

const OCTET_STREAM: &str = "application/octet-stream";

/// An image file loaded into memory.
#[derive(Clone, Debug)]
pub struct LocalImage {
    name: String,
    mime: String,
    bytes: Arc<[u8]>,
}

impl LocalImage {
    /// Read a file and derive its MIME type.
    pub fn open(path: &Path) -> CliResult<Self> {
        let bytes = fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self::from_bytes(name, bytes))
    }

    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let mime = declared_mime(&name, &bytes);
        Self {
            name,
            mime,
            bytes: bytes.into(),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl ImageFile for LocalImage {
    type Preview = LocalPreview;

    fn name(&self) -> String {
        self.name.clone()
    }

    fn mime_type(&self) -> String {
        self.mime.clone()
    }

    fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Reads the header only; the pixels are never decoded.
    fn create_preview(&self) -> Result<LocalPreview, PreviewError> {
        let (width, height) = ImageReader::new(Cursor::new(&self.bytes[..]))
            .with_guessed_format()
            .map_err(|e| PreviewError(e.to_string()))?
            .into_dimensions()
            .map_err(|e| PreviewError(e.to_string()))?;

        Ok(LocalPreview {
            width,
            height,
            size: self.size(),
        })
    }
}

/// Terminal stand-in for the browser preview.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LocalPreview {
    pub width: u32,
    pub height: u32,
    pub size: u64,
}

impl fmt::Display for LocalPreview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}, {}", self.width, self.height, catdog::format_size(self.size))
    }
}

fn declared_mime(name: &str, bytes: &[u8]) -> String {
    let extension = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    if let Some(ext) = extension.as_deref() {
        if let Some(format) = ImageFormat::from_extension(ext) {
            return format.to_mime_type().to_string();
        }
        if let Some(mime) = non_image_mime(ext) {
            return mime.to_string();
        }
    }

    image::guess_format(bytes)
        .map(|format| format.to_mime_type().to_string())
        .unwrap_or_else(|_| OCTET_STREAM.to_string())
}

fn non_image_mime(ext: &str) -> Option<&'static str> {
    match ext {
        "pdf" => Some("application/pdf"),
        "txt" | "md" => Some("text/plain"),
        "csv" => Some("text/csv"),
        "json" => Some("application/json"),
        "html" | "htm" => Some("text/html"),
        "zip" => Some("application/zip"),
        "mp4" => Some("video/mp4"),
        "mp3" => Some("audio/mpeg"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        RgbImage::new(width, height)
            .write_to(&mut out, ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    #[test]
    fn test_mime_follows_extension() {
        assert_eq!(LocalImage::from_bytes("cat.jpg", vec![1, 2, 3]).mime_type(), "image/jpeg");
        assert_eq!(LocalImage::from_bytes("dog.PNG", vec![1, 2, 3]).mime_type(), "image/png");
        assert_eq!(
            LocalImage::from_bytes("doc.pdf", b"%PDF-1.7".to_vec()).mime_type(),
            "application/pdf"
        );
    }

    #[test]
    fn test_mime_sniffed_without_extension() {
        let image = LocalImage::from_bytes("camera-upload", png_bytes(2, 2));
        assert_eq!(image.mime_type(), "image/png");
        assert!(image.is_image());

        let blob = LocalImage::from_bytes("mystery", vec![0, 1, 2, 3]);
        assert_eq!(blob.mime_type(), OCTET_STREAM);
        assert!(!blob.is_image());
    }

    #[test]
    fn test_preview_reads_dimensions() {
        let image = LocalImage::from_bytes("cat.png", png_bytes(8, 6));
        let preview = image.create_preview().unwrap();

        assert_eq!((preview.width, preview.height), (8, 6));
        assert_eq!(preview.size, image.size());
        assert!(preview.to_string().starts_with("8x6, "));
    }

    #[test]
    fn test_preview_fails_on_garbage() {
        let image = LocalImage::from_bytes("broken.png", vec![0; 16]);
        assert!(image.is_image());
        assert!(image.create_preview().is_err());
    }

    #[test]
    fn test_open_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dog.png");
        RgbImage::new(4, 4).save(&path).unwrap();

        let image = LocalImage::open(&path).unwrap();
        assert_eq!(image.name(), "dog.png");
        assert_eq!(image.mime_type(), "image/png");
        assert!(!image.bytes().is_empty());
    }
}
