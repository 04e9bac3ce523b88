//! Scanner Task Main Loop

use crate::scanner::types::{ScanMessage, ScanStats};
use crate::scanner::walker::WalkEntry;
use std::ops::ControlFlow;
use std::time::Instant;

use super::core::ScannerTask;

impl ScannerTask {
    /// Walk the tree and stream results until done or cancelled.
    ///
    /// Blocks the calling thread; the scanner runs it via `spawn_blocking`. Exactly
    /// one terminal message (`Completed` or `Cancelled`) is sent last.
    pub fn run(mut self) -> ScanStats {
        let started = Instant::now();
        let root = self.root().to_path_buf();
        log::debug!("Scan started: {}", root.display());

        let walker = self.walker.clone();
        let mut flow = ControlFlow::Continue(());
        for entry in walker.walk(&root) {
            if self.should_stop() {
                flow = ControlFlow::Break(());
                break;
            }

            flow = match entry {
                WalkEntry::File(path) => self.scan_file(&path),
                WalkEntry::Skipped { path, reason } => self.skip(&path, reason),
            };
            if flow.is_break() {
                break;
            }
        }

        self.stats.cancelled = flow.is_break();
        self.stats.scan_duration = started.elapsed();

        let terminal = if self.stats.cancelled {
            log::info!(
                "Scan of {} cancelled after {} files ({} matches)",
                root.display(),
                self.stats.files_scanned,
                self.stats.matches
            );
            ScanMessage::Cancelled
        } else {
            log::debug!(
                "Scan of {} completed: {} files, {} lines, {} matches, {} skipped in {:?}",
                root.display(),
                self.stats.files_scanned,
                self.stats.lines_scanned,
                self.stats.matches,
                self.stats.files_skipped,
                self.stats.scan_duration
            );
            ScanMessage::Completed
        };

        // Receiver may already be gone; nothing left to deliver to
        let _ = self.emit(terminal);
        self.stats
    }
}
