//! Error types for gho

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for gho operations
pub type Result<T> = std::result::Result<T, GhoError>;

/// Main error type for gho
#[derive(Error, Debug)]
pub enum GhoError {
    /// Schema loading, validation or tree build errors
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// YAML parsing errors
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Schema validation and completion tree build errors
///
/// Cloneable so a failed build can be cached and handed back on every
/// subsequent completion request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Failed to read schema file '{path}': {error}")]
    Read { path: PathBuf, error: String },

    #[error("Command at '{0}' has an empty name")]
    EmptyCommandName(String),

    #[error("Flag on command '{0}' has an empty name")]
    EmptyFlagName(String),

    #[error("Invalid name '{name}' on command '{command}': names must not start with '-' or contain whitespace")]
    InvalidName { command: String, name: String },

    #[error("Invalid type '{kind}' for flag '{flag}'. Must be one of: string, bool, count, int, float, duration, enum, list")]
    InvalidFlagType { flag: String, kind: String },

    #[error("Invalid short form '{short}' for flag '{flag}': must be a single character")]
    InvalidShort { flag: String, short: String },

    #[error("Flag '{0}' takes a value and cannot be negatable")]
    NegatableValueFlag(String),
}

/// Specialized result type for schema operations
pub type SchemaResult<T> = std::result::Result<T, SchemaError>;
