//! Directory walking for scan candidates.
//!
//! Depth-first traversal of a scan root that yields every regular file, whatever its
//! extension. Entries are sorted by file name at each level unless disabled, so two
//! walks of an unchanged tree visit files in the same order.

use crate::scanner::types::{ScannerConfig, SkipReason};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// An item produced while walking
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkEntry {
    /// A regular file to scan
    File(PathBuf),
    /// An entry that could not be traversed (unreadable directory, symlink loop)
    Skipped { path: PathBuf, reason: SkipReason },
}

/// Directory walker built from the scanner configuration.
#[derive(Debug, Clone)]
pub struct DirectoryWalker {
    follow_symlinks: bool,
    sort_entries: bool,
    max_depth: Option<usize>,
}

impl DirectoryWalker {
    pub fn new(config: &ScannerConfig) -> Self {
        Self {
            follow_symlinks: config.follow_symlinks,
            sort_entries: config.sort_entries,
            max_depth: config.max_depth,
        }
    }

    /// Lazily walk `root`, yielding files in traversal order.
    ///
    /// Without `follow_symlinks`, a link to a regular file is yielded like a file but a
    /// link to a directory is never descended into; when following,
    /// walkdir reports links that point back at an ancestor as loop errors, which are
    /// yielded as [`WalkEntry::Skipped`] instead of being descended into.
    pub fn walk(&self, root: &Path) -> impl Iterator<Item = WalkEntry> {
        let mut walker = WalkDir::new(root).follow_links(self.follow_symlinks);

        if let Some(depth) = self.max_depth {
            walker = walker.max_depth(depth);
        }
        if self.sort_entries {
            walker = walker.sort_by_file_name();
        }

        walker.into_iter().filter_map(|entry| match entry {
            Ok(entry) if is_regular_file(&entry) => Some(WalkEntry::File(entry.into_path())),
            Ok(_) => None,
            Err(err) => {
                let path = err.path().map(Path::to_path_buf).unwrap_or_default();
                Some(WalkEntry::Skipped {
                    path,
                    reason: SkipReason::Walk(err.to_string()),
                })
            }
        })
    }
}

// Links that were not followed still count when their target is a regular file
fn is_regular_file(entry: &walkdir::DirEntry) -> bool {
    entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
}
