//! Scanner API
//!
//! Public surface of the scanner system, consolidating the exports the application
//! layer and library users need.

// Starting scans
pub use crate::scanner::manager::Scanner;

// Consuming and cancelling scans
pub use crate::scanner::cancel::CancelHandle;
pub use crate::scanner::handle::ScanHandle;

// Error handling
pub use crate::scanner::error::{InvalidRootReason, ScanError, ScanResult};

// Line matching
pub use crate::scanner::matcher::{
    find, matches, LineMatcher, VectorKind, VectorLiteral, VectorLiteralMatcher,
};

// Core data types and structures
pub use crate::scanner::types::{
    MatchEvent, ScanMessage, ScanOutcome, ScanRequest, ScanStats, ScannerConfig, SkipReason,
};
