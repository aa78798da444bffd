//! Validation of caller-supplied notification requests
//!
//! Validation happens before anything touches the queue: a request that fails
//! here never consumes an id and never produces a record.

use crate::core::error_handling::ContextualError;

/// A notification request that cannot be turned into a record
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("You must supply a \"text\" parameter")]
    MissingText,
}

impl ContextualError for ValidationError {
    fn is_user_actionable(&self) -> bool {
        true
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            ValidationError::MissingText => Some("You must supply a \"text\" parameter"),
        }
    }
}

/// Require the body text of a notification
///
/// Only an absent value is rejected; an empty string is a legitimate (if
/// unhelpful) notification body.
pub fn require_text(text: Option<String>) -> Result<String, ValidationError> {
    text.ok_or(ValidationError::MissingText)
}
