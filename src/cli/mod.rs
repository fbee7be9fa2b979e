//! CLI interface and argument parsing
//!
//! This module handles command-line parsing, logging setup and the hidden
//! completion subcommand that shell integrations call.

pub mod app;

// Re-export main types
pub use app::*;
