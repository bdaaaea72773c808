//! Common utilities for the sprig markup tools.
//!
//! This crate provides shared infrastructure used by the scanner, the tree
//! builder and the CLI:
//! - **Warning System** - deduplicated, colored diagnostics on stderr

pub mod warning;
