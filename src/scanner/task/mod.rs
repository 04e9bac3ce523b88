//! Scanner Task Module
//!
//! The background worker for one scan: directory walking, lenient file reading and
//! message emission. Split into logical submodules.

mod core;
mod reader;
mod run;


pub use self::core::ScannerTask;
