//! Generic error handling utilities
//!
//! Provides unified error handling that works across the crate's error types
//! while keeping domain-specific error logging patterns.

/// Trait for errors that can distinguish between user-actionable and system errors
///
/// Lets generic error handling decide whether to surface the error's own
/// message or a generic operation context with debug details.
///
/// # Implementation Consistency
/// When `is_user_actionable()` returns `true`, `user_message()` should return
/// `Some(message)` with a helpful, actionable message. When it returns
/// `false`, `user_message()` should return `None`.
pub trait ContextualError: std::error::Error {
    /// Returns true if this error carries a specific, user-actionable message
    /// that should be displayed directly to the user
    ///
    /// Examples of user-actionable errors:
    /// - Argument parsing failures
    /// - Configuration errors with clear fixes
    /// - Driving the scan state machine out of order
    ///
    /// Examples of system errors:
    /// - IO failures
    /// - Registry adapter outages
    /// - Snapshot storage failures
    fn is_user_actionable(&self) -> bool;

    /// Returns the specific user message if this is a user-actionable error
    fn user_message(&self) -> Option<&str>;
}

/// Log errors with appropriate detail level based on error specificity
///
/// User-actionable errors log their own message; system errors log the
/// operation context and keep the raw detail at debug level.
///
/// # Examples
/// ```rust,no_run
/// # use rescuescan::core::error_handling::{log_error_with_context, ContextualError};
/// # use rescuescan::scan::api::ScanError;
///
/// // User-actionable error shows its specific message
/// let config_err = ScanError::Configuration {
///     message: "unknown scan mode 'psychic'".to_string(),
/// };
/// log_error_with_context(&config_err, "Scan startup");
/// // Logs: "FATAL: unknown scan mode 'psychic'"
///
/// // System error shows the operation context with debug details
/// let registry_err = ScanError::Registry {
///     message: "components directory unreadable".to_string(),
/// };
/// log_error_with_context(&registry_err, "Scan startup");
/// // Logs: "FATAL: Scan startup"
/// ```
pub fn log_error_with_context<E: ContextualError + std::fmt::Display + std::fmt::Debug>(
    error: &E,
    operation_context: &str,
) {
    // Always emit a primary fatal line containing at least some context plus
    // useful detail. If the error is user-actionable we prefer its user message.
    if error.is_user_actionable() {
        if let Some(user_msg) = error.user_message() {
            log::error!("FATAL: {}", user_msg);
        } else {
            log::error!("FATAL: {}", operation_context);
        }
    } else {
        log::error!("FATAL: {}", operation_context);
    }
    // Raw detail stays at debug level
    log::debug!("DETAIL: {}", error);
    log::debug!("DEBUG_DETAILS: {:?}", error);
}
