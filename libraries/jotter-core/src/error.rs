/// Core error types for Jotter
use thiserror::Error;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for Jotter
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A form field failed local validation and must not be sent
    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// A state machine was asked for a transition it does not allow
    #[error("Invalid transition from {from} on {event}")]
    InvalidTransition {
        from: &'static str,
        event: &'static str,
    },

    /// Note not present in the local list
    #[error("Note not found: {0}")]
    NoteNotFound(String),
}

impl CoreError {
    /// Create a validation error for `field`
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }
}
