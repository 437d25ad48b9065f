//! Classifier configuration.
//!
//! Defaults match the local development setup (inference service on
//! port 8000). Each value can be overridden from the environment, and the
//! CLI layers its flags on top.

use std::env;
use std::time::Duration;

use crate::error::{ConfigError, ConfigResult};

/// Inference endpoint used when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/predict/";

/// Size advertised in the upload copy ("JPEG, PNG up to 5MB").
///
/// Only enforced when [`ClassifierConfig::max_file_size`] is set.
pub const ADVERTISED_MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

/// Environment variable overriding the endpoint.
pub const ENDPOINT_ENV: &str = "CATDOG_ENDPOINT";

/// Environment variable enabling the size limit (bytes).
pub const MAX_FILE_SIZE_ENV: &str = "CATDOG_MAX_FILE_SIZE";

/// Environment variable setting a request timeout (seconds).
pub const TIMEOUT_ENV: &str = "CATDOG_TIMEOUT_SECS";

/// Runtime configuration shared by the page and the CLI.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierConfig {
    /// URL receiving the multipart POST.
    pub endpoint: String,
    /// Reject larger files at selection time. `None` disables the check.
    pub max_file_size: Option<u64>,
    /// Give up on a request after this long. `None` waits forever.
    pub timeout: Option<Duration>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            max_file_size: None,
            timeout: None,
        }
    }
}

impl ClassifierConfig {
    /// Defaults overridden by `CATDOG_*` environment variables.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable source.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(endpoint) = lookup(ENDPOINT_ENV) {
            config = config.with_endpoint(endpoint)?;
        }
        if let Some(raw) = lookup(MAX_FILE_SIZE_ENV) {
            config.max_file_size = Some(parse_number(MAX_FILE_SIZE_ENV, &raw)?);
        }
        if let Some(raw) = lookup(TIMEOUT_ENV) {
            config.timeout = Some(Duration::from_secs(parse_number(TIMEOUT_ENV, &raw)?));
        }

        Ok(config)
    }

    /// Set the endpoint, rejecting anything that is not http(s).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> ConfigResult<Self> {
        let endpoint = endpoint.into();
        let trimmed = endpoint.trim();
        let has_scheme = trimmed.starts_with("http://") || trimmed.starts_with("https://");
        let has_host = trimmed
            .split_once("://")
            .map(|(_, rest)| !rest.is_empty() && !rest.starts_with('/'))
            .unwrap_or(false);
        if !has_scheme || !has_host {
            return Err(ConfigError::InvalidEndpoint(endpoint));
        }
        self.endpoint = trimmed.to_string();
        Ok(self)
    }

    pub fn with_max_file_size(mut self, limit: Option<u64>) -> Self {
        self.max_file_size = limit;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

fn parse_number(key: &str, raw: &str) -> ConfigResult<u64> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        key: key.to_string(),
        value: raw.to_string(),
    })
}
