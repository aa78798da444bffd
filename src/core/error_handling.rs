//! Contextual error reporting
//!
//! Errors surfaced to the person running `toastline` fall in two groups: the
//! ones they can fix (a request without text, a bad value in the config file)
//! and the ones they cannot (a renderer that failed, a service that stopped).
//! The first group is reported verbatim, the second with the operation that
//! failed and the detail at debug level.

/// Errors that know whether their message is meant for the user
///
/// When `is_user_actionable()` returns `true`, `user_message()` must return
/// `Some(message)`; otherwise it returns `None`.
pub trait ContextualError: std::error::Error {
    /// True when the message tells the user what to change
    fn is_user_actionable(&self) -> bool;

    /// The message to show when the error is user-actionable
    fn user_message(&self) -> Option<&str>;
}

/// Log an error at the level of detail its kind deserves
///
/// # Examples
/// ```rust,no_run
/// # use toastline::core::error_handling::log_error_with_context;
/// # use toastline::core::validation::ValidationError;
/// let err = ValidationError::MissingText;
/// log_error_with_context(&err, "Adding notification");
/// // Logs: "FATAL: You must supply a "text" parameter"
/// ```
pub fn log_error_with_context<E: ContextualError + std::fmt::Display + std::fmt::Debug>(
    error: &E,
    operation_context: &str,
) {
    log::error!("FATAL: {}", headline(error, operation_context));
    log::debug!("DETAIL: {}", error);
    log::debug!("DEBUG_DETAILS: {:?}", error);
}

/// Log a failure that only affects one notification
///
/// The controller keeps running; the line carries the notification id so the
/// dropped toast can be matched with its `add` call.
pub fn log_notification_failure<E: ContextualError + std::fmt::Display>(
    error: &E,
    id: impl std::fmt::Display,
    operation_context: &str,
) {
    log::warn!(
        "Notification {} dropped: {}",
        id,
        headline(error, operation_context)
    );
    log::debug!("DETAIL: {}", error);
}

fn headline<'a, E: ContextualError + std::fmt::Display>(
    error: &'a E,
    operation_context: &'a str,
) -> std::borrow::Cow<'a, str> {
    match (error.is_user_actionable(), error.user_message()) {
        (true, Some(user_msg)) => std::borrow::Cow::Borrowed(user_msg),
        _ => std::borrow::Cow::Owned(format!("{operation_context} ({error})")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct TestUserError {
        message: String,
    }

    impl fmt::Display for TestUserError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}", self.message)
        }
    }

    impl std::error::Error for TestUserError {}

    impl ContextualError for TestUserError {
        fn is_user_actionable(&self) -> bool {
            true
        }

        fn user_message(&self) -> Option<&str> {
            Some(&self.message)
        }
    }

    #[derive(Debug)]
    struct TestSystemError {
        internal_details: String,
    }

    impl fmt::Display for TestSystemError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "System error: {}", self.internal_details)
        }
    }

    impl std::error::Error for TestSystemError {}

    impl ContextualError for TestSystemError {
        fn is_user_actionable(&self) -> bool {
            false
        }

        fn user_message(&self) -> Option<&str> {
            None
        }
    }

    #[test]
    fn test_user_actionable_error_uses_its_own_message() {
        let error = TestUserError {
            message: "Invalid max-to-display".to_string(),
        };
        assert_eq!(headline(&error, "Loading configuration"), "Invalid max-to-display");
    }

    #[test]
    fn test_system_error_carries_operation_context() {
        let error = TestSystemError {
            internal_details: "terminal closed".to_string(),
        };
        assert_eq!(
            headline(&error, "Rendering notification"),
            "Rendering notification (System error: terminal closed)"
        );
    }

    #[test]
    fn test_logging_helpers_do_not_panic_without_logger() {
        let error = TestSystemError {
            internal_details: "boom".to_string(),
        };
        log_error_with_context(&error, "Testing");
        log_notification_failure(&error, 7, "Testing");
    }
}
