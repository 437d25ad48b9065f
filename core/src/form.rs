//! The upload-and-classify form.
//!
//! ```text
//!          select_file ok            submit              resolve
//!   Idle ───────────────▶ Ready ───────────────▶ Loading ─────────▶ Result
//!    ▲                                              │
//!    │                                              └─ reject ──────▶ Error
//!    └──────────────────────── reset (from any state, cancels) ─────────┘
//! ```
//!
//! Submission is split in two so callers that cannot hold `&mut` across an
//! await (reactive UIs) can still drive it:
//!
//! 1. [`UploadForm::begin_submit`] flips the state to loading and hands out a
//!    [`SubmitTicket`].
//! 2. [`SubmitTicket::run`] performs the request.
//! 3. [`UploadForm::finish_submit`] applies the [`Completion`], unless the
//!    request was superseded by a reset in the meantime.
//!
//! Native callers can use [`UploadForm::submit`], which chains the three.

use futures::future::{AbortHandle, AbortRegistration, Abortable, Aborted};

use crate::classifier::Classifier;
use crate::config::ClassifierConfig;
use crate::error::{FormError, FormResult, RequestError, RequestResult, ValidationError};
use crate::protocol::Prediction;
use crate::source::ImageFile;

/// Identifies one dispatched request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestToken(u64);

/// What the page should render.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Nothing selected.
    Idle,
    /// A file is selected and nothing is pending.
    Ready,
    /// A request is in flight.
    Loading,
    /// Last request produced a prediction.
    Result,
    /// An error is being shown.
    Error,
}

/// The request currently in flight. Dropping it aborts the request.
struct InFlight {
    token: RequestToken,
    abort: AbortHandle,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.abort.abort();
    }
}

/// Everything needed to perform one dispatched request.
pub struct SubmitTicket<F> {
    token: RequestToken,
    file: F,
    registration: AbortRegistration,
}

impl<F: ImageFile> SubmitTicket<F> {
    pub fn token(&self) -> RequestToken {
        self.token
    }

    pub fn file(&self) -> &F {
        &self.file
    }

    /// Run the request. Resolves to [`RequestError::Cancelled`] if the form
    /// aborted it first.
    pub async fn run<C: Classifier<F>>(self, classifier: &C) -> Completion {
        let SubmitTicket {
            token,
            file,
            registration,
        } = self;

        let outcome = match Abortable::new(classifier.classify(&file), registration).await {
            Ok(outcome) => outcome,
            Err(Aborted) => Err(RequestError::Cancelled),
        };

        Completion { token, outcome }
    }
}

/// Settled request, ready to be applied with [`UploadForm::finish_submit`].
#[derive(Debug)]
pub struct Completion {
    pub token: RequestToken,
    pub outcome: RequestResult<Prediction>,
}

/// Ephemeral state of the upload form.
pub struct UploadForm<F: ImageFile> {
    max_file_size: Option<u64>,
    selected: Option<F>,
    preview: Option<F::Preview>,
    in_flight: Option<InFlight>,
    error: Option<FormError>,
    prediction: Option<Prediction>,
    next_token: u64,
}

impl<F: ImageFile> Default for UploadForm<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: ImageFile> UploadForm<F> {
    /// Empty form without a size limit.
    pub fn new() -> Self {
        Self {
            max_file_size: None,
            selected: None,
            preview: None,
            in_flight: None,
            error: None,
            prediction: None,
            next_token: 0,
        }
    }

    pub fn from_config(config: &ClassifierConfig) -> Self {
        Self::new().with_max_file_size(config.max_file_size)
    }

    pub fn with_max_file_size(mut self, limit: Option<u64>) -> Self {
        self.max_file_size = limit;
        self
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Select a file. Invalid files set an error and leave the previous
    /// selection (and its preview) in place.
    pub fn select_file(&mut self, file: F) -> FormResult<()> {
        let mime = file.mime_type();
        if !file.is_image() {
            return self.fail(ValidationError::NotAnImage { mime }.into());
        }

        if let Some(limit) = self.max_file_size {
            let size = file.size();
            if size > limit {
                return self.fail(ValidationError::TooLarge { size, limit }.into());
            }
        }

        let preview = match file.create_preview() {
            Ok(preview) => preview,
            Err(e) => return self.fail(e.into()),
        };

        log::info!("Selected {} ({}, {} bytes)", file.name(), mime, file.size());

        // Replacing the old preview drops it, which releases it.
        self.preview = Some(preview);
        self.selected = Some(file);
        self.error = None;
        Ok(())
    }

    /// Start a request for the selected file.
    ///
    /// Without a selection this records an error and no request is made.
    /// While another request is in flight it returns [`FormError::Busy`]
    /// and leaves the state alone.
    pub fn begin_submit(&mut self) -> FormResult<SubmitTicket<F>> {
        let Some(file) = self.selected.clone() else {
            return Err(self.record(ValidationError::NoFileSelected.into()));
        };

        if self.in_flight.is_some() {
            log::warn!("Submit ignored: a request is already in flight");
            return Err(FormError::Busy);
        }

        self.next_token += 1;
        let token = RequestToken(self.next_token);
        let (abort, registration) = AbortHandle::new_pair();

        self.in_flight = Some(InFlight { token, abort });
        self.error = None;
        self.prediction = None;

        log::info!("Submitting {} (request {})", file.name(), token.0);

        Ok(SubmitTicket {
            token,
            file,
            registration,
        })
    }

    /// Apply a settled request. Returns `false` when the completion is stale
    /// (reset or cancelled since dispatch) and was ignored.
    pub fn finish_submit(&mut self, completion: Completion) -> bool {
        let current = matches!(&self.in_flight, Some(f) if f.token == completion.token);
        if !current {
            log::debug!("Ignoring stale completion for request {}", completion.token.0);
            return false;
        }

        // Loading ends on every path.
        self.in_flight = None;

        match completion.outcome {
            Ok(prediction) => {
                log::info!(
                    "Request {} classified as {} ({}%)",
                    completion.token.0,
                    prediction.label,
                    prediction.confidence
                );
                self.prediction = Some(prediction);
                self.error = None;
            }
            Err(e) => {
                log::error!("Request {} failed: {}", completion.token.0, e);
                self.prediction = None;
                self.error = Some(FormError::Request(e));
            }
        }
        true
    }

    /// Begin, run and finish a request in one go.
    pub async fn submit<C: Classifier<F>>(&mut self, classifier: &C) -> FormResult<Prediction> {
        let ticket = self.begin_submit()?;
        let completion = ticket.run(classifier).await;
        self.finish_submit(completion);

        match (&self.prediction, &self.error) {
            (Some(prediction), _) => Ok(prediction.clone()),
            (None, Some(error)) => Err(error.clone()),
            (None, None) => Err(RequestError::Cancelled.into()),
        }
    }

    /// Abort the in-flight request, if any. The selection is kept.
    pub fn cancel(&mut self) -> bool {
        match self.in_flight.take() {
            Some(in_flight) => {
                log::info!("Cancelled request {}", in_flight.token.0);
                true
            }
            None => false,
        }
    }

    /// Back to the empty form. Cancels any in-flight request and releases
    /// the preview.
    pub fn reset(&mut self) {
        self.cancel();
        self.selected = None;
        self.preview = None;
        self.prediction = None;
        self.error = None;
    }

    // =========================================================================
    // View queries
    // =========================================================================

    pub fn phase(&self) -> Phase {
        if self.in_flight.is_some() {
            Phase::Loading
        } else if self.error.is_some() {
            Phase::Error
        } else if self.prediction.is_some() {
            Phase::Result
        } else if self.selected.is_some() {
            Phase::Ready
        } else {
            Phase::Idle
        }
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Submit button enabled.
    pub fn can_submit(&self) -> bool {
        self.selected.is_some() && self.in_flight.is_none()
    }

    /// Reset affordance visible.
    pub fn show_reset(&self) -> bool {
        self.selected.is_some()
    }

    pub fn selected(&self) -> Option<&F> {
        self.selected.as_ref()
    }

    pub fn preview(&self) -> Option<&F::Preview> {
        self.preview.as_ref()
    }

    pub fn error(&self) -> Option<&FormError> {
        self.error.as_ref()
    }

    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(FormError::user_message)
    }

    pub fn prediction(&self) -> Option<&Prediction> {
        self.prediction.as_ref()
    }

    /// Prediction to render in the result panel. Hidden while an error is
    /// shown so the two never display together.
    pub fn visible_prediction(&self) -> Option<&Prediction> {
        match self.phase() {
            Phase::Result => self.prediction.as_ref(),
            _ => None,
        }
    }

    fn record(&mut self, error: FormError) -> FormError {
        log::warn!("{}", error);
        self.error = Some(error.clone());
        error
    }

    fn fail(&mut self, error: FormError) -> FormResult<()> {
        Err(self.record(error))
    }
}
