//! # catdog-cli - classify a local image from the terminal
//!
//! Drives the same [`catdog::UploadForm`] as the browser page, with files
//! read from disk and the request sent by reqwest.
//!
//! ## Modules
//!
//! - [`local_image`] - Image files loaded from disk
//! - [`client`] - Multipart client for the inference endpoint
//! - [`commands`] - Command implementations
//! - [`error`] - CLI error type

pub mod client;
pub mod commands;
pub mod error;
pub mod local_image;

pub use client::HttpClassifier;
pub use commands::{
    classify_file, render_config, render_prediction, resolve_config, ClassifyOutcome, Overrides,
};
pub use error::{CliError, CliResult};
pub use local_image::{LocalImage, LocalPreview};
