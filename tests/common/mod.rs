//! Common test utilities

#![allow(dead_code)]

use gho::schema::builtin_schema;
use gho::Completer;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// A completer over the built-in schema
pub fn builtin_completer() -> Completer {
    Completer::new(builtin_schema().unwrap())
}

/// Resolve against the built-in schema
pub fn complete(cword: i64, words: &[&str]) -> Vec<String> {
    builtin_completer().resolve(cword, words).unwrap()
}

/// Create a temporary directory with a schema.yml file
pub fn create_test_schema(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let schema_path = temp_dir.path().join("schema.yml");
    fs::write(&schema_path, content).unwrap();
    (temp_dir, schema_path)
}
