//! Scanner Task Core Implementation
//!
//! Core ScannerTask struct, its per-scan state and message emission.

use crate::scanner::cancel::CancelHandle;
use crate::scanner::matcher::LineMatcher;
use crate::scanner::types::{ScanMessage, ScanRequest, ScanStats, ScannerConfig};
use crate::scanner::walker::DirectoryWalker;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Cursor of one in-flight scan, owned by its worker and never shared
#[derive(Debug, Default)]
pub(crate) struct ScanState {
    pub current_dir: Option<PathBuf>,
    pub current_file: Option<PathBuf>,
    pub line_number: usize,
}

impl ScanState {
    /// Move the cursor to the start of `path`
    pub fn enter_file(&mut self, path: &Path) {
        let dir = path.parent().map(Path::to_path_buf);
        if dir != self.current_dir {
            log::trace!("Entering directory {:?}", dir);
            self.current_dir = dir;
        }
        self.current_file = Some(path.to_path_buf());
        self.line_number = 0;
    }

    /// Advance to the next line, returning its 1-based number
    pub fn next_line(&mut self) -> usize {
        self.line_number += 1;
        self.line_number
    }

    pub fn leave_file(&mut self) {
        self.current_file = None;
        self.line_number = 0;
    }
}

/// Worker for a single scan
///
/// Runs synchronously on tokio's blocking pool; see [`ScannerTask::run`].
pub struct ScannerTask {
    pub(super) request: ScanRequest,
    pub(super) walker: DirectoryWalker,
    pub(super) matcher: Arc<dyn LineMatcher>,
    pub(super) cancel: CancelHandle,
    pub(super) sender: mpsc::Sender<ScanMessage>,
    pub(super) state: ScanState,
    pub(super) stats: ScanStats,
}

impl ScannerTask {
    pub fn new(
        request: ScanRequest,
        config: &ScannerConfig,
        matcher: Arc<dyn LineMatcher>,
        cancel: CancelHandle,
        sender: mpsc::Sender<ScanMessage>,
    ) -> Self {
        Self {
            request,
            walker: DirectoryWalker::new(config),
            matcher,
            cancel,
            sender,
            state: ScanState::default(),
            stats: ScanStats::start(),
        }
    }

    /// Get the scan root
    pub fn root(&self) -> &Path {
        self.request.root()
    }

    /// Stop when the caller cancelled or stopped listening
    pub(super) fn should_stop(&self) -> bool {
        self.cancel.is_cancelled() || self.sender.is_closed()
    }

    /// Deliver one message, blocking while the channel is full.
    /// Returns false once the receiving side is gone.
    pub(super) fn emit(&self, message: ScanMessage) -> bool {
        self.sender.blocking_send(message).is_ok()
    }
}
