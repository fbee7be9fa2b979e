//! Command schema loading and validation
//!
//! This module handles the declarative description of the gho command
//! surface that completion is computed from.

pub mod parse;
pub mod types;
pub mod validate;

// Re-export main types
pub use parse::*;
pub use types::*;
pub use validate::*;
