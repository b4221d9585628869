//! Local input validation failures
//!
//! The `Display` text of each variant is exactly what the page shows the user.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter both Merchant ID and Amount")]
    MissingSingleCheckFields,
    #[error("Please enter a valid numeric Amount")]
    InvalidAmount,
    #[error("Please select both start and end dates")]
    MissingDates,
    #[error("Please enter dates in YYYY-MM-DD format")]
    InvalidDate,
    #[error("Start date must be before end date")]
    DateOrder,
}
