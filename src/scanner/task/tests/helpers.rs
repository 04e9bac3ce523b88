//! Test Helper Functions
//!
//! Shared utilities for scanner task tests. The worker runs synchronously on the
//! test thread, so the channel must be large enough for every message it sends.

use crate::scanner::task::ScannerTask;
use crate::scanner::cancel::CancelHandle;
use crate::scanner::matcher::{LineMatcher, VectorLiteralMatcher};
use crate::scanner::types::{MatchEvent, ScanMessage, ScanRequest, ScanStats, ScannerConfig};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::mpsc;

const TEST_CHANNEL_CAPACITY: usize = 4096;

/// Helper to create a directory tree from (relative path, contents) pairs
pub fn create_tree(files: &[(&str, &[u8])]) -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    for (relative, contents) in files {
        let path = dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, contents).expect("Failed to write fixture file");
    }
    dir
}

/// Run a task to completion with the given matcher and cancel handle
pub fn run_task_with(
    root: &Path,
    config: &ScannerConfig,
    matcher: Arc<dyn LineMatcher>,
    cancel: CancelHandle,
) -> (Vec<ScanMessage>, ScanStats) {
    let (sender, mut receiver) = mpsc::channel(TEST_CHANNEL_CAPACITY);
    let task = ScannerTask::new(ScanRequest::new(root), config, matcher, cancel, sender);

    let stats = task.run();

    let mut messages = Vec::new();
    while let Ok(message) = receiver.try_recv() {
        messages.push(message);
    }
    (messages, stats)
}

/// Run a task with the default configuration and vector literal matcher
pub fn run_task(root: &Path) -> (Vec<ScanMessage>, ScanStats) {
    run_task_with(
        root,
        &ScannerConfig::default(),
        Arc::new(VectorLiteralMatcher),
        CancelHandle::new(),
    )
}

/// Extract match events, with file paths made relative to `root`
pub fn relative_matches(root: &Path, messages: &[ScanMessage]) -> Vec<MatchEvent> {
    messages
        .iter()
        .filter_map(|message| match message {
            ScanMessage::Match(event) => Some(MatchEvent {
                file_path: event
                    .file_path
                    .strip_prefix(root)
                    .expect("match path should be under the scan root")
                    .to_path_buf(),
                ..event.clone()
            }),
            _ => None,
        })
        .collect()
}
