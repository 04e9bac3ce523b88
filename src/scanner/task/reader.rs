//! Scanner Task File Reading
//!
//! Per-file line reading with lenient UTF-8 decoding.

use crate::scanner::types::{MatchEvent, ScanMessage, SkipReason};
use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::ops::ControlFlow;
use std::path::Path;

use super::core::ScannerTask;

/// Read one line into `buf`, terminator included.
///
/// `\n`, `\r\n` and a lone `\r` all end a line. Returns the number of bytes consumed,
/// 0 at end of file.
pub(crate) fn read_line<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> io::Result<usize> {
    let mut total = 0;
    let mut ended_with_cr = false;

    loop {
        let (used, done) = {
            let available = match reader.fill_buf() {
                Ok(available) => available,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            match available.iter().position(|&b| b == b'\n' || b == b'\r') {
                Some(end) => {
                    ended_with_cr = available[end] == b'\r';
                    buf.extend_from_slice(&available[..=end]);
                    (end + 1, true)
                }
                None => {
                    buf.extend_from_slice(available);
                    (available.len(), available.is_empty())
                }
            }
        };
        reader.consume(used);
        total += used;
        if done {
            break;
        }
    }

    // The `\n` of a `\r\n` pair may only arrive with the next fill
    if ended_with_cr && next_is_newline(reader)? {
        reader.consume(1);
        buf.push(b'\n');
        total += 1;
    }
    Ok(total)
}

fn next_is_newline<R: BufRead>(reader: &mut R) -> io::Result<bool> {
    loop {
        match reader.fill_buf() {
            Ok(next) => return Ok(next.first() == Some(&b'\n')),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
}

/// Decode one raw line, dropping its `\n`, `\r\n` or `\r` terminator.
///
/// Invalid UTF-8 is replaced with U+FFFD; the result is `Cow::Owned` exactly when a
/// replacement happened.
pub(crate) fn decode_line(raw: &[u8]) -> Cow<'_, str> {
    let line = raw.strip_suffix(b"\n").unwrap_or(raw);
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    String::from_utf8_lossy(line)
}

impl ScannerTask {
    /// Scan one file line by line.
    ///
    /// Open and read failures skip the file without stopping the scan. Returns
    /// `Break` only when the scan itself must stop (cancelled or receiver gone).
    /// The file handle is released on every return path.
    pub(super) fn scan_file(&mut self, path: &Path) -> ControlFlow<()> {
        self.state.enter_file(path);
        let flow = self.read_lines(path);
        self.state.leave_file();
        flow
    }

    fn read_lines(&mut self, path: &Path) -> ControlFlow<()> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) => return self.skip(path, SkipReason::Open(e.to_string())),
        };

        let mut reader = BufReader::new(file);
        let mut buf = Vec::new();
        let mut lossy = false;

        loop {
            if self.should_stop() {
                return ControlFlow::Break(());
            }

            buf.clear();
            match read_line(&mut reader, &mut buf) {
                Ok(0) => break,
                Ok(_) => {}
                Err(e) => {
                    // Lines already reported stand; the rest of the file is lost
                    return self.skip(path, SkipReason::Read(e.to_string()));
                }
            }

            let line_number = self.state.next_line();
            let line = decode_line(&buf);
            lossy |= matches!(line, Cow::Owned(_));
            self.stats.lines_scanned += 1;

            if self.matcher.is_match(&line) {
                let event = MatchEvent {
                    file_path: path.to_path_buf(),
                    line_number,
                    line_text: line.trim().to_string(),
                };
                if !self.emit(ScanMessage::Match(event)) {
                    return ControlFlow::Break(());
                }
                self.stats.matches += 1;
            }
        }

        self.stats.files_scanned += 1;
        if lossy {
            log::debug!("Invalid UTF-8 replaced while reading {}", path.display());
            self.stats.files_lossy += 1;
        }
        ControlFlow::Continue(())
    }

    /// Record a skipped entry and report it as a diagnostic
    pub(super) fn skip(&mut self, path: &Path, reason: SkipReason) -> ControlFlow<()> {
        log::debug!("Skipping {}: {}", path.display(), reason);
        self.stats.files_skipped += 1;

        let message = ScanMessage::FileSkipped {
            path: path.to_path_buf(),
            reason,
        };
        if self.should_stop() || !self.emit(message) {
            return ControlFlow::Break(());
        }
        ControlFlow::Continue(())
    }
}
