//! Scan Cancellation
//!
//! A cloneable flag shared between a caller and one scan worker.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Requests early termination of one in-flight scan
///
/// Cloning yields another handle to the same scan. Cancelling is idempotent.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    requested: Arc<AtomicBool>,
}

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the worker to stop; it finishes the current line and sends `Cancelled`
    pub fn cancel(&self) {
        // Release pairs with the Acquire load in is_cancelled()
        if !self.requested.swap(true, Ordering::Release) {
            log::debug!("Scan cancellation requested");
        }
    }

    /// Check if cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        self.requested.load(Ordering::Acquire)
    }
}
