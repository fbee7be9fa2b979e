//! Shell tab-completion
//!
//! This module turns the command schema into a completion tree and resolves
//! partial command lines against it.

pub mod matcher;
pub mod resolve;
pub mod tree;
pub mod walker;

// Re-export main types
pub use matcher::*;
pub use resolve::*;
pub use tree::*;
pub use walker::*;
