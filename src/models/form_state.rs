//! Per-form UI state

/// Lifecycle of a single form. Each controller owns exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}
