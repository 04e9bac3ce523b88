//! Test modules for the scanner system
//!
//! Covers starting scans through the manager and consuming them through the handle.
