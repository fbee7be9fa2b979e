//! gho - command-line client for a content-management REST API
//!
//! This crate holds the shell tab-completion core of gho: a declarative
//! command schema, the completion tree built from it, and the resolver that
//! turns a partial command line into completion candidates.

// Public modules
pub mod cli;
pub mod completion;
pub mod error;
pub mod schema;

// Re-export commonly used types
pub use completion::Completer;
pub use error::{GhoError, Result, SchemaError};

/// Current version of gho
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
