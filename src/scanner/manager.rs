//! Scanner Manager
//!
//! Entry point for starting scans. Validates the root on the caller's thread, then
//! hands the walk to a dedicated worker on tokio's blocking pool and returns a
//! [`ScanHandle`] immediately.

use crate::scanner::cancel::CancelHandle;
use crate::scanner::error::{InvalidRootReason, ScanError, ScanResult};
use crate::scanner::handle::ScanHandle;
use crate::scanner::matcher::{LineMatcher, VectorLiteralMatcher};
use crate::scanner::task::ScannerTask;
use crate::scanner::types::{ScanRequest, ScannerConfig};
use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Starts scans with a shared configuration and line matcher
///
/// Each call to [`Scanner::scan`] gets its own worker, channel and cancel handle;
/// concurrent scans never share state.
#[derive(Clone)]
pub struct Scanner {
    config: ScannerConfig,
    matcher: Arc<dyn LineMatcher>,
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Scanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scanner")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Scanner {
    /// Scanner for vector literals with the default configuration
    pub fn new() -> Self {
        Self::with_config(ScannerConfig::default())
    }

    pub fn with_config(config: ScannerConfig) -> Self {
        Self {
            config,
            matcher: Arc::new(VectorLiteralMatcher),
        }
    }

    /// Replace the line matcher
    pub fn with_matcher(mut self, matcher: impl LineMatcher + 'static) -> Self {
        self.matcher = Arc::new(matcher);
        self
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// Check that `root` exists and is a directory
    pub fn validate_root(root: &Path) -> ScanResult<()> {
        match std::fs::metadata(root) {
            Ok(metadata) if metadata.is_dir() => Ok(()),
            Ok(_) => Err(ScanError::invalid_root(
                root,
                InvalidRootReason::NotADirectory,
            )),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(ScanError::invalid_root(root, InvalidRootReason::NotFound))
            }
            Err(e) => {
                log::debug!("Cannot inspect scan root {}: {}", root.display(), e);
                Err(ScanError::invalid_root(
                    root,
                    InvalidRootReason::Inaccessible,
                ))
            }
        }
    }

    /// Start scanning `request.root()` in the background
    ///
    /// Fails with [`ScanError::InvalidRoot`] before any background work starts.
    /// Must be called from within a tokio runtime.
    pub fn scan(&self, request: ScanRequest) -> ScanResult<ScanHandle> {
        Self::validate_root(request.root())?;

        let (sender, receiver) = mpsc::channel(self.config.effective_channel_capacity());
        let cancel = CancelHandle::new();

        log::debug!(
            "Spawning scan worker for {} ({:?})",
            request.root().display(),
            self.config
        );
        let task = ScannerTask::new(
            request,
            &self.config,
            Arc::clone(&self.matcher),
            cancel.clone(),
            sender,
        );
        let worker = tokio::task::spawn_blocking(move || task.run());

        Ok(ScanHandle::new(receiver, cancel, worker))
    }
}
