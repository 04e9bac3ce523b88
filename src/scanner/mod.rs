//! Scanner Component
//!
//! Finds `vector3(...)` and `vector4(...)` literals in every file below a root
//! directory and streams each matching line back to the caller while the walk is
//! still running.
//!
//! ## Core Features
//!
//! - **Matcher**: pure line predicate for 3- and 4-component numeric literals
//! - **DirectoryWalker**: depth-first, name-sorted traversal of regular files
//! - **ScannerTask**: background worker with lenient UTF-8 decoding
//! - **Scanner / ScanHandle**: non-blocking start, streamed results, cancellation

pub mod api;
pub mod cancel;
pub mod error;
pub mod handle;
pub mod manager;
pub mod matcher;
pub mod task;
pub mod types;
pub mod walker;

#[cfg(test)]
mod tests;

pub use cancel::CancelHandle;
pub use error::{InvalidRootReason, ScanError, ScanResult};
pub use handle::ScanHandle;
pub use manager::Scanner;
pub use matcher::{find, matches, LineMatcher, VectorKind, VectorLiteral, VectorLiteralMatcher};
pub use types::{
    MatchEvent, ScanMessage, ScanOutcome, ScanRequest, ScanStats, ScannerConfig, SkipReason,
};
