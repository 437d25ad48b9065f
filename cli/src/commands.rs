//! Command implementations.

use std::path::Path;
use std::time::Duration;

use catdog::{ClassifierConfig, FormError, ImageFile, Prediction, PreviewError, UploadForm};

use crate::client::HttpClassifier;
use crate::error::CliResult;
use crate::local_image::{LocalImage, LocalPreview};

/// Flag overrides applied on top of the environment.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub endpoint: Option<String>,
    pub max_file_size: Option<u64>,
    pub timeout_secs: Option<u64>,
}

/// Defaults, then `CATDOG_*` variables, then flags.
pub fn resolve_config(overrides: &Overrides) -> CliResult<ClassifierConfig> {
    let mut config = ClassifierConfig::from_env()?;
    apply_overrides(&mut config, overrides)?;
    Ok(config)
}

fn apply_overrides(config: &mut ClassifierConfig, overrides: &Overrides) -> CliResult<()> {
    if let Some(ref endpoint) = overrides.endpoint {
        *config = config.clone().with_endpoint(endpoint.as_str())?;
    }
    if overrides.max_file_size.is_some() {
        config.max_file_size = overrides.max_file_size;
    }
    if let Some(secs) = overrides.timeout_secs {
        config.timeout = Some(Duration::from_secs(secs));
    }
    Ok(())
}

/// Result of a successful `classify` run.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifyOutcome {
    pub file_name: String,
    pub preview: LocalPreview,
    pub prediction: Prediction,
}

/// Select `path` in a fresh form and submit it.
pub async fn classify_file(path: &Path, config: &ClassifierConfig) -> CliResult<ClassifyOutcome> {
    let image = LocalImage::open(path)?;
    let file_name = image.name();
    let classifier = HttpClassifier::new(config)?;

    let mut form = UploadForm::from_config(config);
    form.select_file(image)?;

    // select_file succeeded, so a preview exists
    let preview = form.preview().copied().ok_or_else(|| {
        FormError::from(PreviewError("preview missing after selection".to_string()))
    })?;
    eprintln!("🖼️  {} ({})", file_name, preview);
    eprintln!("📡 Sending to {}", classifier.endpoint());

    let prediction = form.submit(&classifier).await?;

    Ok(ClassifyOutcome {
        file_name,
        preview,
        prediction,
    })
}

/// Lines printed for a prediction, matching the page's result panel.
pub fn render_prediction(prediction: &Prediction) -> Vec<String> {
    vec![
        format!("{} {}", prediction.label.emoji(), prediction.headline()),
        prediction.confidence_label(),
    ]
}

/// Human readable dump of the effective configuration.
pub fn render_config(config: &ClassifierConfig) -> Vec<String> {
    vec![
        format!("Endpoint:      {}", config.endpoint),
        format!(
            "Max file size: {}",
            config
                .max_file_size
                .map(catdog::format_size)
                .unwrap_or_else(|| format!(
                    "not enforced (advertised {})",
                    catdog::format_size(catdog::ADVERTISED_MAX_FILE_SIZE)
                ))
        ),
        format!(
            "Timeout:       {}",
            config
                .timeout
                .map(|t| format!("{}s", t.as_secs()))
                .unwrap_or_else(|| "none".to_string())
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::{failing_router, inference_router, spawn_server};
    use crate::error::CliError;
    use catdog::{PetClass, INVALID_IMAGE_MESSAGE, REQUEST_FAILED_MESSAGE};
    use image::RgbImage;

    fn config_for(endpoint: String) -> ClassifierConfig {
        ClassifierConfig::default().with_endpoint(endpoint).unwrap()
    }

    #[tokio::test]
    async fn test_classify_cat() {
        let endpoint = spawn_server(inference_router()).await;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cat.png");
        RgbImage::new(16, 12).save(&path).unwrap();

        let outcome = classify_file(&path, &config_for(endpoint)).await.unwrap();

        assert_eq!(outcome.file_name, "cat.png");
        assert_eq!((outcome.preview.width, outcome.preview.height), (16, 12));
        assert_eq!(outcome.prediction.label, PetClass::Cat);
        assert_eq!(
            render_prediction(&outcome.prediction),
            vec!["🐱 This is a Cat!".to_string(), "Confidence: 97%".to_string()]
        );
    }

    #[tokio::test]
    async fn test_pdf_is_rejected_before_any_request() {
        // Nothing listens here; a request would fail with a transport error.
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.pdf");
        std::fs::write(&path, b"%PDF-1.7\n").unwrap();

        let err = classify_file(&path, &config_for("http://127.0.0.1:9/predict/".into()))
            .await
            .unwrap_err();

        assert!(matches!(err, CliError::Form(_)));
        assert_eq!(err.user_message(), INVALID_IMAGE_MESSAGE);
    }

    #[tokio::test]
    async fn test_server_error_gives_generic_message() {
        let endpoint = spawn_server(failing_router()).await;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dog.png");
        RgbImage::new(4, 4).save(&path).unwrap();

        let err = classify_file(&path, &config_for(endpoint)).await.unwrap_err();

        assert_eq!(err.user_message(), REQUEST_FAILED_MESSAGE);
    }

    #[tokio::test]
    async fn test_size_limit_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cat.png");
        RgbImage::new(64, 64).save(&path).unwrap();

        let config = config_for("http://127.0.0.1:9/predict/".into()).with_max_file_size(Some(10));
        let err = classify_file(&path, &config).await.unwrap_err();

        assert!(err.user_message().contains("smaller than"));
    }

    #[test]
    fn test_overrides_win() {
        let mut config = ClassifierConfig::default();
        apply_overrides(
            &mut config,
            &Overrides {
                endpoint: Some("https://pets.example.com/predict/".into()),
                max_file_size: Some(1024),
                timeout_secs: Some(3),
            },
        )
        .unwrap();

        assert_eq!(config.endpoint, "https://pets.example.com/predict/");
        assert_eq!(config.max_file_size, Some(1024));
        assert_eq!(config.timeout, Some(Duration::from_secs(3)));
    }

    #[test]
    fn test_bad_endpoint_override() {
        let mut config = ClassifierConfig::default();
        let err = apply_overrides(
            &mut config,
            &Overrides {
                endpoint: Some("not a url".into()),
                ..Overrides::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn test_render_config() {
        let lines = render_config(&ClassifierConfig::default());
        assert_eq!(lines[0], "Endpoint:      http://localhost:8000/predict/");
        assert_eq!(lines[1], "Max file size: not enforced (advertised 5MB)");
        assert_eq!(lines[2], "Timeout:       none");
    }
}
