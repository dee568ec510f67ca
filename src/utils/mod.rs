//! Utility functions module
//!
//! This module contains output formatting helpers shared by the CLI.

pub mod format;

pub use format::*;
