//! Generic error handling utilities
//!
//! Fatal errors are reported through one function so the CLI words them the same
//! way regardless of which module produced them.

/// Errors that know whether the user can fix them
///
/// User-actionable errors (a bad scan root, a broken config file) are shown in full
/// together with a hint. System errors (a crashed worker) only show the failed
/// operation; their details go to the debug log.
///
/// When `is_user_actionable()` returns `true`, `user_message()` should return
/// `Some(hint)`; otherwise it should return `None`.
pub trait ContextualError: std::error::Error {
    /// Returns true if the user can resolve this error by changing their input
    fn is_user_actionable(&self) -> bool;

    /// Short advice on how to fix a user-actionable error
    fn user_message(&self) -> Option<&str>;
}

/// Log a fatal error with a level of detail matching its kind
///
/// # Arguments
/// * `error` - The error to report
/// * `operation_context` - Human-readable description of the operation that failed
///
/// # Examples
/// ```rust,no_run
/// # use vecscan::core::error_handling::log_error_with_context;
/// # use vecscan::scanner::api::Scanner;
/// if let Err(e) = Scanner::validate_root(std::path::Path::new("/no/such/dir")) {
///     // FATAL: Invalid scan root '/no/such/dir': path does not exist
///     // HINT: Pass an existing directory as the scan root
///     log_error_with_context(&e, "Starting scan");
/// }
/// ```
pub fn log_error_with_context<E: ContextualError + std::fmt::Display + std::fmt::Debug>(
    error: &E,
    operation_context: &str,
) {
    if error.is_user_actionable() {
        log::error!("FATAL: {}", error);
        if let Some(hint) = error.user_message() {
            log::error!("HINT: {}", hint);
        }
    } else {
        log::error!("FATAL: {} failed", operation_context);
    }
    log::debug!("DETAIL: {}", error);
    log::debug!("DEBUG_DETAILS: {:?}", error);
}
