//! Single transaction check models

use super::ValidationError;

/// Substring the backend uses to mark a fraudulent verdict
pub const FRAUD_MARKER: &str = "Fraud";
/// Substring the backend uses to mark a safe verdict
pub const SAFE_MARKER: &str = "Safe";

/// A validated single-check submission
#[derive(Debug, Clone, PartialEq)]
pub struct SingleCheckRequest {
    pub merchant_id: String,
    pub amount: String,
}

impl SingleCheckRequest {
    /// Build a request from raw form input.
    ///
    /// Both fields are trimmed. Missing fields are reported before the amount
    /// is checked for being numeric.
    pub fn new(merchant_id: &str, amount: &str) -> Result<Self, ValidationError> {
        let merchant_id = merchant_id.trim();
        let amount = amount.trim();

        if merchant_id.is_empty() || amount.is_empty() {
            return Err(ValidationError::MissingSingleCheckFields);
        }

        match amount.parse::<f64>() {
            Ok(value) if value.is_finite() => {}
            _ => return Err(ValidationError::InvalidAmount),
        }

        Ok(Self {
            merchant_id: merchant_id.to_string(),
            amount: amount.to_string(),
        })
    }
}

/// Display category of the verdict box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Fraud,
    Safe,
    Error,
    Neutral,
}

impl Category {
    /// CSS class applied to the verdict box alongside the base class
    pub fn css_class(self) -> &'static str {
        match self {
            Category::Fraud => "fraud-result",
            Category::Safe => "safe-result",
            Category::Error => "error-result",
            Category::Neutral => "neutral-result",
        }
    }

    pub const ALL: [Category; 4] = [
        Category::Fraud,
        Category::Safe,
        Category::Error,
        Category::Neutral,
    ];
}

/// Classify a backend verdict by the marker it contains.
///
/// The fraud marker wins when both are present.
pub fn classify_verdict(verdict: &str) -> Category {
    if verdict.contains(FRAUD_MARKER) {
        Category::Fraud
    } else if verdict.contains(SAFE_MARKER) {
        Category::Safe
    } else {
        Category::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_trims_fields() {
        let request = SingleCheckRequest::new("  M123 ", " 42.50 ").unwrap();
        assert_eq!(request.merchant_id, "M123");
        assert_eq!(request.amount, "42.50");
    }

    #[test]
    fn test_request_rejects_blank_fields() {
        for (merchant, amount) in [("", "10"), ("   ", "10"), ("M1", ""), ("M1", " \t "), ("", "")] {
            assert_eq!(
                SingleCheckRequest::new(merchant, amount),
                Err(ValidationError::MissingSingleCheckFields),
                "merchant={:?} amount={:?}",
                merchant,
                amount
            );
        }
    }

    #[test]
    fn test_request_rejects_non_numeric_amount() {
        assert_eq!(
            SingleCheckRequest::new("M1", "twelve"),
            Err(ValidationError::InvalidAmount)
        );
        assert_eq!(
            SingleCheckRequest::new("M1", "NaN"),
            Err(ValidationError::InvalidAmount)
        );
    }

    #[test]
    fn test_classify_verdict() {
        assert_eq!(classify_verdict("Fraud detected"), Category::Fraud);
        assert_eq!(classify_verdict("Fraud Transaction"), Category::Fraud);
        assert_eq!(classify_verdict("Safe transaction"), Category::Safe);
        assert_eq!(classify_verdict("Unknown"), Category::Neutral);
        assert_eq!(classify_verdict("No matching transaction found in dataset"), Category::Neutral);
    }

    #[test]
    fn test_classify_verdict_is_case_sensitive() {
        assert_eq!(classify_verdict("fraud"), Category::Neutral);
        assert_eq!(classify_verdict("SAFE"), Category::Neutral);
    }
}
