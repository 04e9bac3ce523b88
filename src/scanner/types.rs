//! Scanner Types and Enums
//!
//! Shared types used throughout the scanner module.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Request to scan one directory tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRequest {
    root: PathBuf,
}

impl ScanRequest {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory of the scan
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// One line containing a vector literal
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchEvent {
    /// Path of the file, as produced by joining the scan root with the relative entry path
    pub file_path: PathBuf,
    /// 1-based line number within the file
    pub line_number: usize,
    /// Full line content with surrounding whitespace trimmed
    pub line_text: String,
}

/// Why a file was passed over
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The file could not be opened (permissions, vanished, special file)
    Open(String),
    /// Reading failed part-way through; lines before the failure were still scanned
    Read(String),
    /// Directory entry could not be listed or is part of a symlink loop
    Walk(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::Open(e) => write!(f, "cannot open: {}", e),
            SkipReason::Read(e) => write!(f, "read failed: {}", e),
            SkipReason::Walk(e) => write!(f, "cannot traverse: {}", e),
        }
    }
}

/// Messages streamed from a scan worker to its caller
///
/// Every scan ends with exactly one of [`ScanMessage::Completed`] or
/// [`ScanMessage::Cancelled`]; nothing is sent after it.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanMessage {
    /// A matching line
    Match(MatchEvent),
    /// Non-fatal diagnostic: a file or directory entry was skipped
    FileSkipped { path: PathBuf, reason: SkipReason },
    /// Every file under the root was visited
    Completed,
    /// The scan stopped early on request; results are incomplete
    Cancelled,
}

impl ScanMessage {
    /// True for the terminal `Completed`/`Cancelled` messages
    pub fn is_terminal(&self) -> bool {
        matches!(self, ScanMessage::Completed | ScanMessage::Cancelled)
    }
}

/// How a scan ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    Completed,
    Cancelled,
}

/// Scan statistics, collected by the worker
#[derive(Debug, Clone, PartialEq)]
pub struct ScanStats {
    pub started_at: DateTime<Utc>,
    pub files_scanned: usize,
    pub files_skipped: usize,
    /// Files containing byte sequences that were not valid UTF-8
    pub files_lossy: usize,
    pub lines_scanned: usize,
    pub matches: usize,
    pub cancelled: bool,
    pub scan_duration: Duration,
}

impl ScanStats {
    pub(crate) fn start() -> Self {
        Self {
            started_at: Utc::now(),
            files_scanned: 0,
            files_skipped: 0,
            files_lossy: 0,
            lines_scanned: 0,
            matches: 0,
            cancelled: false,
            scan_duration: Duration::ZERO,
        }
    }

    pub fn outcome(&self) -> ScanOutcome {
        if self.cancelled {
            ScanOutcome::Cancelled
        } else {
            ScanOutcome::Completed
        }
    }
}

/// Scanner configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannerConfig {
    /// Follow symbolic links while walking; loops are detected and skipped
    pub follow_symlinks: bool,
    /// Visit directory entries sorted by file name at every level
    pub sort_entries: bool,
    /// Maximum depth below the root (root itself is depth 0)
    pub max_depth: Option<usize>,
    /// Number of messages buffered between the worker and the caller, clamped to
    /// `1..=MAX_CHANNEL_CAPACITY` when a scan starts
    pub channel_capacity: usize,
}

impl ScannerConfig {
    pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;
    /// Largest buffer a scan will allocate; tokio panics above `usize::MAX >> 3`
    pub const MAX_CHANNEL_CAPACITY: usize = 1 << 20;

    /// Capacity actually used for the scan channel
    pub fn effective_channel_capacity(&self) -> usize {
        self.channel_capacity.clamp(1, Self::MAX_CHANNEL_CAPACITY)
    }
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            sort_entries: true,
            max_depth: None,
            channel_capacity: Self::DEFAULT_CHANNEL_CAPACITY,
        }
    }
}
