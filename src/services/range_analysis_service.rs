use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::api::predictor::{ApiError, PredictionApi};
use crate::models::{RangeOutcome, RangeRequest, UiState};
use crate::page::{ids, Document, Page};
use crate::services::render_service;

pub const TRANSPORT_ERROR_MESSAGE: &str = "An error occurred while processing your request.";

/// Drives the date range form: validate, mark busy, submit, render the analysis.
pub struct RangeAnalysisController {
    api: Arc<dyn PredictionApi>,
    page: Page,
    state: Mutex<UiState>,
}

impl RangeAnalysisController {
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
    pub async fn on_submit(&self, start_date: &str, end_date: &str) {
        if let Some(request) = self.prepare(start_date, end_date) {
            self.dispatch(request).await;
        }
    }

    /// Synchronous half of a submission: validation, then the busy button.
    ///
    /// A rejected submission raises an alert and leaves the button alone.
    pub fn prepare(&self, start_date: &str, end_date: &str) -> Option<RangeRequest> {
        let request = match RangeRequest::new(start_date, end_date) {
            Ok(request) => request,
            Err(e) => {
                debug!("Range analysis rejected locally: {}", e);
                self.page.update(|doc| doc.alert(&e.to_string()));
                self.set_state(UiState::Failed);
                return None;
            }
        };

        let marked = self
            .page
            .update(|doc| render_service::render_submit_button(doc, ids::ANALYZE_BUTTON, true));
        if let Err(e) = marked {
            warn!("Could not mark analyze button busy: {}", e);
        }
        self.set_state(UiState::Submitting);
        Some(request)
    }

    /// Send a validated request, restore the button, then render the outcome
    pub async fn dispatch(&self, request: RangeRequest) {
        let span = info_span!(
            "range_analysis",
            request_id = %Uuid::new_v4(),
            start_date = %request.start_date,
            end_date = %request.end_date
        );

        async {
            let response = self.api.analyze_range(&request).await;
            let succeeded = self.page.update(|doc| Self::settle(doc, response));
            self.set_state(if succeeded { UiState::Succeeded } else { UiState::Failed });
        }
        .instrument(span)
        .await
    }

    /// Apply a response to the page in one step. Returns whether the analysis rendered.
    fn settle(doc: &mut Document, response: Result<RangeOutcome, ApiError>) -> bool {
        if let Err(e) = render_service::render_submit_button(doc, ids::ANALYZE_BUTTON, false) {
            warn!("Could not restore analyze button: {}", e);
        }

        match response {
            Ok(RangeOutcome::Analysis(result)) => {
                match render_service::render_analysis(doc, &result) {
                    Ok(()) => {
                        info!(
                            "Rendered analysis: {} transactions, {} fraudulent",
                            result.total_transactions, result.fraud_transactions
                        );
                        true
                    }
                    Err(e) => {
                        error!("Failed to render analysis: {}", e);
                        doc.alert(TRANSPORT_ERROR_MESSAGE);
                        false
                    }
                }
            }
            Ok(RangeOutcome::Rejected(rejection)) => {
                warn!("Backend rejected range: {}", rejection.message);
                doc.alert(&rejection.alert_text());
                false
            }
            Err(e) => {
                error!("Range analysis failed: {}", e);
                doc.alert(TRANSPORT_ERROR_MESSAGE);
                false
            }
        }
    }
}
