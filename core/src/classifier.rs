//! The network seam.

use crate::error::RequestResult;
use crate::protocol::Prediction;
use crate::source::ImageFile;

/// Sends one file to the inference endpoint and parses the answer.
///
/// Implementations issue exactly one request per call and never retry.
/// Futures are not required to be `Send`: the browser client holds JS
/// values across its await points.
#[allow(async_fn_in_trait)]
pub trait Classifier<F: ImageFile> {
    async fn classify(&self, file: &F) -> RequestResult<Prediction>;
}
