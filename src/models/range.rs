//! Date range analysis models

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::ValidationError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A validated date range submission. `start_date <= end_date` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl RangeRequest {
    /// Build a request from the raw date inputs.
    ///
    /// Checks run in order: both present, both parseable, then ordering.
    pub fn new(start_date: &str, end_date: &str) -> Result<Self, ValidationError> {
        let start_date = start_date.trim();
        let end_date = end_date.trim();

        if start_date.is_empty() || end_date.is_empty() {
            return Err(ValidationError::MissingDates);
        }

        let start = NaiveDate::parse_from_str(start_date, DATE_FORMAT)
            .map_err(|_| ValidationError::InvalidDate)?;
        let end = NaiveDate::parse_from_str(end_date, DATE_FORMAT)
            .map_err(|_| ValidationError::InvalidDate)?;

        if start > end {
            return Err(ValidationError::DateOrder);
        }

        Ok(Self {
            start_date: start,
            end_date: end,
        })
    }
}

/// One sample transaction as sent by the backend.
///
/// Field names follow the backend's wire spelling, `isFradulent` included.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TransactionRow {
    #[serde(rename = "Merchant_id", default, deserialize_with = "lenient_text")]
    pub merchant_id: Option<String>,
    #[serde(rename = "first", default, deserialize_with = "lenient_text")]
    pub first_name: Option<String>,
    #[serde(rename = "last", default, deserialize_with = "lenient_text")]
    pub last_name: Option<String>,
    #[serde(rename = "Transaction_amount", default)]
    pub amount: Option<f64>,
    #[serde(rename = "isFradulent", default, deserialize_with = "lenient_text")]
    pub is_fraudulent: Option<String>,
}

impl TransactionRow {
    /// Only an exact `"Y"` marks a row as fraudulent.
    pub fn is_fraud(&self) -> bool {
        self.is_fraudulent.as_deref() == Some("Y")
    }
}

/// The backend serialises a dataframe, so text columns sometimes arrive as numbers.
///
/// Falsy values (`0`, `false`) count as missing so the cell shows its placeholder.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => None,
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// Successful analysis of a date range
#[derive(Debug, Clone, PartialEq)]
pub struct RangeAnalysisResult {
    pub total_transactions: u64,
    pub fraud_transactions: u64,
    pub accuracy: f64,
    pub first_two: Vec<TransactionRow>,
    pub last_two: Vec<TransactionRow>,
    pub line_chart: Option<String>,
    pub pie_chart: Option<String>,
}

/// Well-formed error reported by the analysis backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisError {
    pub message: String,
    pub debug_info: Option<String>,
}

impl AnalysisError {
    /// Text shown in the blocking alert. Debug detail follows a blank line.
    pub fn alert_text(&self) -> String {
        match self.debug_info.as_deref() {
            Some(debug) if !debug.is_empty() => format!("{}\n\n{}", self.message, debug),
            _ => self.message.clone(),
        }
    }
}

/// Exactly one of these is produced per successful round trip
#[derive(Debug, Clone, PartialEq)]
pub enum RangeOutcome {
    Analysis(RangeAnalysisResult),
    Rejected(AnalysisError),
}
