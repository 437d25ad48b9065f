//! Error types for the upload form.
//!
//! - [`ValidationError`] - the user picked something we refuse to send
//! - [`RequestError`] - the round trip to the inference endpoint failed
//! - [`PreviewError`] - the selected file could not be turned into a preview
//! - [`ConfigError`] - bad configuration values
//! - [`FormError`] - top-level error stored by [`crate::UploadForm`]
//!
//! The detailed variant is kept for logs. What the user reads comes from
//! [`FormError::user_message`], which collapses every request failure into
//! one generic sentence.

use thiserror::Error;

/// Shown when the selected file is not an image.
pub const INVALID_IMAGE_MESSAGE: &str = "Please select a valid image file.";

/// Shown when submit is attempted with nothing selected.
pub const NO_FILE_MESSAGE: &str = "Please select an image first.";

/// Shown for any failed round trip (transport, status, body shape).
pub const REQUEST_FAILED_MESSAGE: &str = "An error occurred while processing the image.";

/// Shown when the preview could not be created.
pub const PREVIEW_FAILED_MESSAGE: &str = "Could not preview the selected image.";

/// Shown when submit is attempted while a request is still running.
pub const BUSY_MESSAGE: &str = "A classification is already in progress.";

// =============================================================================
// Validation Errors
// =============================================================================

/// Input rejected before any network call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Declared MIME type does not start with `image/`.
    #[error("Not an image: declared type is '{mime}'")]
    NotAnImage { mime: String },

    /// Submit without a selected file.
    #[error("No file selected")]
    NoFileSelected,

    /// File is larger than the configured limit.
    #[error("File is {size} bytes, limit is {limit} bytes")]
    TooLarge { size: u64, limit: u64 },
}

// =============================================================================
// Request Errors
// =============================================================================

/// Failures of the single POST to the inference endpoint.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestError {
    /// Could not build or send the request, or read the body.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Endpoint answered with a non-2xx status.
    #[error("Server returned HTTP {0}")]
    Status(u16),

    /// 2xx answer whose body is not a valid prediction.
    #[error("Malformed response: {0}")]
    Response(String),

    /// The request was aborted before it settled.
    #[error("Request cancelled")]
    Cancelled,
}

// =============================================================================
// Preview Errors
// =============================================================================

/// The platform could not create a preview for the file.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Preview failed: {0}")]
pub struct PreviewError(pub String);

// =============================================================================
// Config Errors
// =============================================================================

/// Invalid configuration values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Endpoint is not an http(s) URL.
    #[error("Invalid endpoint URL: {0}")]
    InvalidEndpoint(String),

    /// A numeric setting could not be parsed.
    #[error("Invalid value for {key}: '{value}'")]
    InvalidNumber { key: String, value: String },
}

// =============================================================================
// Form Errors (top-level)
// =============================================================================

/// Coarse category of a [`FormError`], used for styling and exit paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Preview,
    Transport,
    Status,
    Response,
    Cancelled,
    Busy,
}

impl ErrorKind {
    /// CSS class for the error line.
    pub fn css_class(&self) -> &'static str {
        match self {
            ErrorKind::Validation | ErrorKind::Preview => "error-validation",
            ErrorKind::Busy => "error-busy",
            _ => "error-request",
        }
    }
}

/// Error recorded by the form and surfaced as plain text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Request error: {0}")]
    Request(#[from] RequestError),

    #[error("{0}")]
    Preview(#[from] PreviewError),

    /// Submit while a request is in flight.
    #[error("A request is already in flight")]
    Busy,
}

impl FormError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FormError::Validation(_) => ErrorKind::Validation,
            FormError::Preview(_) => ErrorKind::Preview,
            FormError::Busy => ErrorKind::Busy,
            FormError::Request(RequestError::Transport(_)) => ErrorKind::Transport,
            FormError::Request(RequestError::Status(_)) => ErrorKind::Status,
            FormError::Request(RequestError::Response(_)) => ErrorKind::Response,
            FormError::Request(RequestError::Cancelled) => ErrorKind::Cancelled,
        }
    }

    /// Text displayed to the user.
    pub fn user_message(&self) -> String {
        match self {
            FormError::Validation(ValidationError::NotAnImage { .. }) => {
                INVALID_IMAGE_MESSAGE.to_string()
            }
            FormError::Validation(ValidationError::NoFileSelected) => NO_FILE_MESSAGE.to_string(),
            FormError::Validation(ValidationError::TooLarge { limit, .. }) => {
                format!("Please select an image smaller than {}.", format_size(*limit))
            }
            FormError::Preview(_) => PREVIEW_FAILED_MESSAGE.to_string(),
            FormError::Busy => BUSY_MESSAGE.to_string(),
            FormError::Request(_) => REQUEST_FAILED_MESSAGE.to_string(),
        }
    }
}

/// Human readable byte count ("5MB", "512KB", "12 bytes").
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * KB;
    if bytes >= MB && bytes % MB == 0 {
        format!("{}MB", bytes / MB)
    } else if bytes >= MB {
        format!("{:.1}MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{}KB", bytes / KB)
    } else {
        format!("{} bytes", bytes)
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for form operations.
pub type FormResult<T> = Result<T, FormError>;

/// Result type for the network round trip.
pub type RequestResult<T> = Result<T, RequestError>;

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_failures_share_one_message() {
        let errors = [
            FormError::from(RequestError::Transport("connection refused".into())),
            FormError::from(RequestError::Status(500)),
            FormError::from(RequestError::Response("expected value".into())),
        ];
        for err in &errors {
            assert_eq!(err.user_message(), REQUEST_FAILED_MESSAGE);
        }
    }

    #[test]
    fn test_detail_is_kept_for_logs() {
        let err = FormError::from(RequestError::Status(503));
        assert!(err.to_string().contains("503"));
        assert_eq!(err.kind(), ErrorKind::Status);
    }

    #[test]
    fn test_validation_messages() {
        let err = FormError::from(ValidationError::NotAnImage {
            mime: "application/pdf".into(),
        });
        assert_eq!(err.user_message(), INVALID_IMAGE_MESSAGE);
        assert_eq!(err.kind().css_class(), "error-validation");

        let err = FormError::from(ValidationError::TooLarge {
            size: 6 * 1024 * 1024,
            limit: 5 * 1024 * 1024,
        });
        assert_eq!(err.user_message(), "Please select an image smaller than 5MB.");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(5 * 1024 * 1024), "5MB");
        assert_eq!(format_size(1536 * 1024), "1.5MB");
        assert_eq!(format_size(2048), "2KB");
        assert_eq!(format_size(12), "12 bytes");
    }
}
