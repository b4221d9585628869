pub mod client;
pub mod models;

use async_trait::async_trait;

use crate::models::{RangeOutcome, RangeRequest, SingleCheckRequest};

pub use client::PredictorClient;
pub use models::ApiError;

/// Transport seam between the form controllers and the prediction backend.
///
/// Every call is a single attempt: no retry, no client-side de-duplication.
#[async_trait]
pub trait PredictionApi: Send + Sync {
    /// POST /predict_single, returning the raw verdict text
    async fn predict_single(&self, request: &SingleCheckRequest) -> Result<String, ApiError>;

    /// POST /analyze_range
    async fn analyze_range(&self, request: &RangeRequest) -> Result<RangeOutcome, ApiError>;
}
