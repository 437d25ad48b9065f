//! HTTP client for the inference endpoint.
//!
//! One multipart POST per call, no retries. The status is checked before
//! the body is read; a non-2xx answer is a failure whatever it contains.

use reqwest::multipart::{Form, Part};

use catdog::{
    parse_response, Classifier, ClassifierConfig, ImageFile, Prediction, RequestError,
    RequestResult, FILE_FIELD,
};

use crate::error::{CliError, CliResult};
use crate::local_image::LocalImage;

/// reqwest-backed [`Classifier`].
#[derive(Clone)]
pub struct HttpClassifier {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpClassifier {
    pub fn new(config: &ClassifierConfig) -> CliResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| CliError::Http(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Classifier<LocalImage> for HttpClassifier {
    async fn classify(&self, file: &LocalImage) -> RequestResult<Prediction> {
        let part = Part::bytes(file.bytes().to_vec())
            .file_name(file.name())
            .mime_str(&file.mime_type())
            .map_err(|e| RequestError::Transport(e.to_string()))?;
        let form = Form::new().part(FILE_FIELD, part);

        log::debug!("POST {} ({} bytes)", self.endpoint, file.size());

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| RequestError::Transport(e.to_string()))?;

        let status = response.status();
        log::debug!("Response status: {}", status);

        if !status.is_success() {
            return Err(RequestError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| RequestError::Transport(e.to_string()))?;

        parse_response(status.as_u16(), &body)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use axum::{
        extract::Multipart,
        http::StatusCode,
        response::{IntoResponse, Response},
        routing::post,
        Router,
    };
    use catdog::PetClass;
    use std::time::Duration;

    /// Accepts `POST /predict/` and checks the upload before answering.
    async fn predict(mut multipart: Multipart) -> Response {
        while let Ok(Some(field)) = multipart.next_field().await {
            if field.name() != Some(FILE_FIELD) {
                continue;
            }
            let file_name = field.file_name().map(str::to_string);
            let content_type = field.content_type().map(str::to_string);
            let Ok(bytes) = field.bytes().await else {
                return StatusCode::BAD_REQUEST.into_response();
            };

            if bytes.is_empty() || !content_type.as_deref().unwrap_or("").starts_with("image/") {
                return StatusCode::UNPROCESSABLE_ENTITY.into_response();
            }

            let label = match file_name.as_deref() {
                Some(name) if name.starts_with("dog") => "Dog",
                _ => "Cat",
            };
            let body = format!(r#"{{"class": "{}", "confidence": 97}}"#, label);
            return ([("content-type", "application/json")], body).into_response();
        }
        StatusCode::BAD_REQUEST.into_response()
    }

    /// Serve `router` on an ephemeral port and return the predict URL.
    pub(crate) async fn spawn_server(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/predict/", addr)
    }

    pub(crate) fn inference_router() -> Router {
        Router::new().route("/predict/", post(predict))
    }

    pub(crate) fn failing_router() -> Router {
        Router::new().route(
            "/predict/",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, r#"{"class":"Cat","confidence":97}"#) }),
        )
    }

    fn classifier_for(endpoint: String) -> HttpClassifier {
        let config = ClassifierConfig::default().with_endpoint(endpoint).unwrap();
        HttpClassifier::new(&config).unwrap()
    }

    fn fake_jpeg(name: &str) -> LocalImage {
        LocalImage::from_bytes(name, vec![0xFF, 0xD8, 0xFF, 0xE0, 0, 0x10])
    }

    #[tokio::test]
    async fn test_sends_file_part_and_parses_prediction() {
        let endpoint = spawn_server(inference_router()).await;
        let classifier = classifier_for(endpoint);

        let prediction = classifier.classify(&fake_jpeg("cat.jpg")).await.unwrap();
        assert_eq!(prediction.label, PetClass::Cat);
        assert_eq!(prediction.confidence, 97.0);

        let prediction = classifier.classify(&fake_jpeg("dog.jpg")).await.unwrap();
        assert_eq!(prediction.label, PetClass::Dog);
    }

    #[tokio::test]
    async fn test_server_error_ignores_body() {
        let endpoint = spawn_server(failing_router()).await;
        let classifier = classifier_for(endpoint);

        let err = classifier.classify(&fake_jpeg("dog.jpg")).await.unwrap_err();
        assert_eq!(err, RequestError::Status(500));
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let router = Router::new().route("/predict/", post(|| async { "<html>oops</html>" }));
        let endpoint = spawn_server(router).await;

        let err = classifier_for(endpoint)
            .classify(&fake_jpeg("cat.jpg"))
            .await
            .unwrap_err();
        assert!(matches!(err, RequestError::Response(_)));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = classifier_for(format!("http://{}/predict/", addr))
            .classify(&fake_jpeg("cat.jpg"))
            .await
            .unwrap_err();
        assert!(matches!(err, RequestError::Transport(_)));
    }

    #[tokio::test]
    async fn test_timeout_is_a_transport_error() {
        let router = Router::new().route(
            "/predict/",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                r#"{"class":"Cat","confidence":97}"#
            }),
        );
        let endpoint = spawn_server(router).await;
        let config = ClassifierConfig::default()
            .with_endpoint(endpoint)
            .unwrap()
            .with_timeout(Some(Duration::from_millis(200)));

        let err = HttpClassifier::new(&config)
            .unwrap()
            .classify(&fake_jpeg("cat.jpg"))
            .await
            .unwrap_err();
        assert!(matches!(err, RequestError::Transport(_)));
    }
}
