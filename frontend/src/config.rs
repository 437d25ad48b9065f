//! Build-time configuration.
//!
//! The page has no process environment, so `CATDOG_ENDPOINT` and
//! `CATDOG_MAX_FILE_SIZE` are read when the WASM bundle is compiled:
//!
//! ```bash
//! CATDOG_ENDPOINT=https://pets.example.com/predict/ trunk build --release
//! ```

use catdog::{ClassifierConfig, ENDPOINT_ENV, MAX_FILE_SIZE_ENV};

/// Application title, shown in the hero and the document title.
pub const APP_NAME: &str = "Cat vs Dog Classifier";

/// Configuration baked into this build. Invalid values fall back to the
/// defaults with an error in the console.
pub fn classifier_config() -> ClassifierConfig {
    let lookup = |key: &str| {
        match key {
            ENDPOINT_ENV => option_env!("CATDOG_ENDPOINT"),
            MAX_FILE_SIZE_ENV => option_env!("CATDOG_MAX_FILE_SIZE"),
            _ => None,
        }
        .map(str::to_string)
    };

    ClassifierConfig::from_lookup(lookup).unwrap_or_else(|e| {
        log::error!("Invalid build configuration, using defaults: {}", e);
        ClassifierConfig::default()
    })
}
