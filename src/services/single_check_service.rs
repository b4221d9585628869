use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, error, info, info_span, Instrument};
use uuid::Uuid;

use crate::api::predictor::PredictionApi;
use crate::models::{classify_verdict, Category, SingleCheckRequest, UiState};
use crate::page::{ids, Page};
use crate::services::render_service;

pub const TRANSPORT_ERROR_MESSAGE: &str = "An error occurred. Please try again.";

/// Drives the single transaction form: validate, submit, render the verdict.
pub struct SingleCheckController {
    api: Arc<dyn PredictionApi>,
    page: Page,
    state: Mutex<UiState>,
}

impl SingleCheckController {
    pub fn new(api: Arc<dyn PredictionApi>, page: Page) -> Self {
        Self {
            api,
            page,
            state: Mutex::new(UiState::Idle),
        }
    }

    pub fn state(&self) -> UiState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_state(&self, state: UiState) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = state;
    }

    /// Handle a form submission end to end
    pub async fn on_submit(&self, merchant_id: &str, amount: &str) {
        if let Some(request) = self.prepare(merchant_id, amount) {
            self.dispatch(request).await;
        }
    }

    /// Synchronous half of a submission.
    ///
    /// Returns the request to send, or renders the validation error and
    /// returns `None` without touching the network.
    pub fn prepare(&self, merchant_id: &str, amount: &str) -> Option<SingleCheckRequest> {
        match SingleCheckRequest::new(merchant_id, amount) {
            Ok(request) => {
                self.set_state(UiState::Submitting);
                Some(request)
            }
            Err(e) => {
                debug!("Single check rejected locally: {}", e);
                self.show(&e.to_string(), Category::Error);
                self.set_state(UiState::Failed);
                None
            }
        }
    }

    /// Send a validated request and render whatever comes back
    pub async fn dispatch(&self, request: SingleCheckRequest) {
        let span = info_span!("single_check", request_id = %Uuid::new_v4(), merchant_id = %request.merchant_id);

        async {
            match self.api.predict_single(&request).await {
                Ok(verdict) => {
                    let category = classify_verdict(&verdict);
                    info!("Verdict {:?}: {}", category, verdict);
                    self.show(&verdict, category);
                    self.set_state(UiState::Succeeded);
                }
                Err(e) => {
                    error!("Single check failed: {}", e);
                    self.show(TRANSPORT_ERROR_MESSAGE, Category::Error);
                    self.set_state(UiState::Failed);
                }
            }
        }
        .instrument(span)
        .await
    }

    fn show(&self, message: &str, category: Category) {
        let rendered = self
            .page
            .update(|doc| render_service::render_verdict(doc, ids::RESULT_BOX, message, category));
        if let Err(e) = rendered {
            error!("Failed to render verdict: {}", e);
        }
    }
}
