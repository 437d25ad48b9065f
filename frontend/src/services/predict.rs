//! HTTP service sending the selected image to the inference endpoint.

use catdog::{
    parse_response, Classifier, ClassifierConfig, ImageFile, Prediction, RequestError,
    RequestResult, FILE_FIELD,
};
use gloo_net::http::Request;
use web_sys::{AbortController, FormData};

use crate::types::{js_error, BrowserImage};

/// Aborts the underlying fetch when dropped.
///
/// The form drops the request future when it is reset mid-flight; this
/// turns that into a real network cancellation.
struct FetchAbort(AbortController);

impl Drop for FetchAbort {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// fetch-backed [`Classifier`].
#[derive(Clone, Debug)]
pub struct BrowserClassifier {
    endpoint: String,
}

impl BrowserClassifier {
    pub fn new(config: &ClassifierConfig) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
        }
    }
}

impl Classifier<BrowserImage> for BrowserClassifier {
    async fn classify(&self, file: &BrowserImage) -> RequestResult<Prediction> {
        let transport = |e: wasm_bindgen::JsValue| RequestError::Transport(js_error(&e));

        let form_data = FormData::new().map_err(transport)?;
        form_data
            .append_with_blob_and_filename(FILE_FIELD, file.as_file(), &file.name())
            .map_err(transport)?;

        let abort = FetchAbort(AbortController::new().map_err(transport)?);
        let signal = abort.0.signal();

        let request = Request::post(&self.endpoint)
            .abort_signal(Some(&signal))
            .body(form_data)
            .map_err(|e| RequestError::Transport(e.to_string()))?;

        let response = request
            .send()
            .await
            .map_err(|e| RequestError::Transport(e.to_string()))?;

        // Status first; the body of a failed response is never read.
        if !response.ok() {
            return Err(RequestError::Status(response.status()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| RequestError::Transport(e.to_string()))?;

        parse_response(response.status(), &body)
    }
}
