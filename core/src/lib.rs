//! # catdog - upload an image, get "Cat" or "Dog" back
//!
//! Platform-neutral core of the Cat vs Dog classifier. The browser page and
//! the command line tool both drive the same [`UploadForm`]; they only differ
//! in how files are read ([`ImageFile`]) and how the request is sent
//! ([`Classifier`]).
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐     ┌─────────────┐
//! │  ImageFile  │────▶│  UploadForm  │────▶│  Classifier  │────▶│ Prediction  │
//! │ (file, mime)│     │ (state, RAII │     │ (multipart   │     │ (Cat | Dog, │
//! │             │     │  preview)    │     │  POST)       │     │  0-100 %)   │
//! └─────────────┘     └──────────────┘     └──────────────┘     └─────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`form`] - The form state machine
//! - [`protocol`] - Wire format of the inference endpoint
//! - [`source`] - File handle trait
//! - [`classifier`] - Network seam
//! - [`config`] - Endpoint and limits
//! - [`error`] - Error types and user-facing messages

pub mod classifier;
pub mod config;
pub mod error;
pub mod form;
pub mod protocol;
pub mod source;

// =============================================================================
// Re-exports
// =============================================================================

pub use classifier::Classifier;

pub use config::{
    ClassifierConfig,
    ADVERTISED_MAX_FILE_SIZE,
    DEFAULT_ENDPOINT,
    ENDPOINT_ENV,
    MAX_FILE_SIZE_ENV,
    TIMEOUT_ENV,
};

pub use error::{
    ConfigError,
    ErrorKind,
    FormError,
    FormResult,
    PreviewError,
    RequestError,
    RequestResult,
    ValidationError,
    format_size,
    BUSY_MESSAGE,
    INVALID_IMAGE_MESSAGE,
    NO_FILE_MESSAGE,
    PREVIEW_FAILED_MESSAGE,
    REQUEST_FAILED_MESSAGE,
};

pub use form::{Completion, Phase, RequestToken, SubmitTicket, UploadForm};

pub use protocol::{parse_response, PetClass, Prediction, FILE_FIELD};

pub use source::ImageFile;
