//! Toast Error Types

use crate::core::error_handling::ContextualError;
use crate::core::validation::ValidationError;

/// Failure reported by a [`Renderer`](crate::toast::Renderer) operation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{operation} failed: {message}")]
pub struct RenderError {
    pub operation: &'static str,
    pub message: String,
}

impl RenderError {
    pub fn new(operation: &'static str, message: impl Into<String>) -> Self {
        Self {
            operation,
            message: message.into(),
        }
    }
}

impl ContextualError for RenderError {
    fn is_user_actionable(&self) -> bool {
        false
    }

    fn user_message(&self) -> Option<&str> {
        None
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ToastError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Renderer error: {0}")]
    Render(#[from] RenderError),

    #[error("Notification service has stopped")]
    ServiceStopped,
}

impl ContextualError for ToastError {
    fn is_user_actionable(&self) -> bool {
        matches!(self, ToastError::Validation(_))
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            ToastError::Validation(err) => err.user_message(),
            _ => None,
        }
    }
}

/// Result type for toast operations
pub type ToastResult<T> = Result<T, ToastError>;
