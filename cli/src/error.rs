//! Error type for the command line tool.

use catdog::{ConfigError, FormError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    /// Failed to read the image from disk.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Bad endpoint, size or timeout setting.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The form rejected the file or the request failed.
    #[error("{0}")]
    Form(#[from] FormError),

    /// HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Http(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Text printed to the user. Form errors use the same wording as the page.
    pub fn user_message(&self) -> String {
        match self {
            CliError::Form(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;
