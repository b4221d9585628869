use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{
    AnalysisError, RangeAnalysisResult, RangeOutcome, RangeRequest, SingleCheckRequest,
    TransactionRow,
};

/// URL-encoded body of POST /predict_single
#[derive(Debug, Clone, Serialize)]
pub struct PredictSingleForm<'a> {
    pub merchant_id: &'a str,
    pub amount: &'a str,
}

impl<'a> From<&'a SingleCheckRequest> for PredictSingleForm<'a> {
    fn from(request: &'a SingleCheckRequest) -> Self {
        Self {
            merchant_id: &request.merchant_id,
            amount: &request.amount,
        }
    }
}

/// Response from POST /predict_single
#[derive(Debug, Clone, Deserialize)]
pub struct PredictSingleResponse {
    pub result: String,
}

/// URL-encoded body of POST /analyze_range
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeRangeForm {
    pub start_date: String,
    pub end_date: String,
}

impl From<&RangeRequest> for AnalyzeRangeForm {
    fn from(request: &RangeRequest) -> Self {
        Self {
            start_date: request.start_date.format("%Y-%m-%d").to_string(),
            end_date: request.end_date.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Response from POST /analyze_range.
///
/// The backend sends either the error shape or the analysis shape in the
/// same object, so every field is optional here and `into_outcome` decides.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyzeRangeResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub debug_info: Option<String>,
    #[serde(default)]
    pub total_transactions: Option<u64>,
    #[serde(default)]
    pub fraud_transactions: Option<u64>,
    #[serde(default)]
    pub accuracy: Option<f64>,
    #[serde(default)]
    pub first_two: Option<Vec<TransactionRow>>,
    #[serde(default)]
    pub last_two: Option<Vec<TransactionRow>>,
    #[serde(default)]
    pub line_chart: Option<String>,
    #[serde(default)]
    pub pie_chart: Option<String>,
}

impl AnalyzeRangeResponse {
    pub fn into_outcome(self) -> Result<RangeOutcome, ApiError> {
        if let Some(message) = self.error.filter(|m| !m.is_empty()) {
            return Ok(RangeOutcome::Rejected(AnalysisError {
                message,
                debug_info: self.debug_info,
            }));
        }

        let missing = |field: &str| {
            ApiError::DeserializationError(format!("analysis payload is missing `{}`", field))
        };

        Ok(RangeOutcome::Analysis(RangeAnalysisResult {
            total_transactions: self.total_transactions.ok_or_else(|| missing("total_transactions"))?,
            fraud_transactions: self.fraud_transactions.ok_or_else(|| missing("fraud_transactions"))?,
            accuracy: self.accuracy.ok_or_else(|| missing("accuracy"))?,
            first_two: self.first_two.unwrap_or_default(),
            last_two: self.last_two.unwrap_or_default(),
            line_chart: self.line_chart,
            pie_chart: self.pie_chart,
        }))
    }
}

/// Failure to complete a round trip with the prediction backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// 5xx Server Error
    #[error("Server Error ({0}): {1}")]
    ServerError(u16, String),
    /// Other non-success HTTP status
    #[error("HTTP Error ({0}): {1}")]
    HttpError(u16, String),
    /// Network/request error
    #[error("Request Error: {0}")]
    RequestError(String),
    /// Body was not the expected JSON shape
    #[error("Deserialization Error: {0}")]
    DeserializationError(String),
}
