//! Request and result view-models for the fraud assessment forms
//!
//! Every model here is request scoped: it is built from form input or a
//! backend payload, handed to the renderer, and dropped.

pub mod form_state;
pub mod range;
pub mod single_check;
pub mod validation;

pub use form_state::UiState;
pub use range::{AnalysisError, RangeAnalysisResult, RangeOutcome, RangeRequest, TransactionRow};
pub use single_check::{classify_verdict, Category, SingleCheckRequest};
pub use validation::ValidationError;
