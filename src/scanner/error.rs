//! Scanner Error Types

use std::fmt;
use std::path::PathBuf;

/// Why a scan root was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidRootReason {
    /// Nothing exists at the given path
    NotFound,
    /// The path exists but is not a directory
    NotADirectory,
    /// The path could not be inspected (e.g. permission denied on a parent)
    Inaccessible,
}

impl fmt::Display for InvalidRootReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidRootReason::NotFound => write!(f, "path does not exist"),
            InvalidRootReason::NotADirectory => write!(f, "path is not a directory"),
            InvalidRootReason::Inaccessible => write!(f, "path cannot be accessed"),
        }
    }
}

/// Scanner error types
///
/// Only errors that stop a scan from starting (or report a broken worker) live here.
/// Per-file problems are absorbed by the worker and surfaced as
/// [`ScanMessage::FileSkipped`](crate::scanner::types::ScanMessage::FileSkipped).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScanError {
    /// Scan root is missing or not a directory
    #[error("Invalid scan root '{}': {reason}", path.display())]
    InvalidRoot {
        path: PathBuf,
        reason: InvalidRootReason,
    },

    /// Background worker panicked or was aborted
    #[error("Scan worker failed: {message}")]
    WorkerFailed { message: String },
}

impl ScanError {
    pub(crate) fn invalid_root(path: impl Into<PathBuf>, reason: InvalidRootReason) -> Self {
        ScanError::InvalidRoot {
            path: path.into(),
            reason,
        }
    }
}

impl crate::core::error_handling::ContextualError for ScanError {
    fn is_user_actionable(&self) -> bool {
        match self {
            ScanError::InvalidRoot { .. } => true, // User picked the wrong path
            ScanError::WorkerFailed { .. } => false,
        }
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            ScanError::InvalidRoot { reason, .. } => Some(match reason {
                InvalidRootReason::NotFound => "Pass an existing directory as the scan root",
                InvalidRootReason::NotADirectory => {
                    "Pass a directory, not a file, as the scan root"
                }
                InvalidRootReason::Inaccessible => {
                    "Check the permissions of the scan root and its parents"
                }
            }),
            ScanError::WorkerFailed { .. } => None,
        }
    }
}

pub type ScanResult<T> = Result<T, ScanError>;
