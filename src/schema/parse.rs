//! Schema file parsing and discovery

use crate::error::{GhoError, SchemaError};
use crate::schema::types::Schema;
use directories::ProjectDirs;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming an explicit schema file
pub const SCHEMA_ENV_VAR: &str = "GHO_SCHEMA";

/// Schema file name looked up in the user config directory
const SCHEMA_FILE_NAME: &str = "schema.yml";

/// Schema shipped with the binary
const BUILTIN_SCHEMA: &str = include_str!("builtin.yml");

/// Where a schema came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaSource {
    /// A file on disk
    File(PathBuf),
    /// The embedded default schema
    Builtin,
}

/// Parse the embedded default schema
pub fn builtin_schema() -> Result<Schema, GhoError> {
    parse_schema(BUILTIN_SCHEMA)
}

/// Parse a schema from a YAML string
pub fn parse_schema(yaml: &str) -> Result<Schema, GhoError> {
    let schema: Schema = serde_yaml::from_str(yaml)?;
    Ok(schema)
}

/// Parse a schema file from a path
pub fn parse_schema_file(path: &Path) -> Result<Schema, GhoError> {
    let contents = fs::read_to_string(path).map_err(|e| SchemaError::Read {
        path: path.to_path_buf(),
        error: e.to_string(),
    })?;

    parse_schema(&contents)
}

/// Locate the schema to use
///
/// An explicit path wins, then `GHO_SCHEMA`, then `schema.yml` in the user
/// config directory. Falls back to the built-in schema.
pub fn find_schema_file(explicit: Option<PathBuf>) -> SchemaSource {
    let user_dir = ProjectDirs::from("", "", "gho").map(|dirs| dirs.config_dir().to_path_buf());
    find_schema_file_from(explicit, env::var_os(SCHEMA_ENV_VAR).map(PathBuf::from), user_dir)
}

/// Locate the schema given each candidate location explicitly
pub fn find_schema_file_from(
    explicit: Option<PathBuf>,
    from_env: Option<PathBuf>,
    config_dir: Option<PathBuf>,
) -> SchemaSource {
    if let Some(path) = explicit {
        return SchemaSource::File(path);
    }

    if let Some(path) = from_env.filter(|p| !p.as_os_str().is_empty()) {
        return SchemaSource::File(path);
    }

    if let Some(dir) = config_dir {
        let candidate = dir.join(SCHEMA_FILE_NAME);
        if candidate.is_file() {
            return SchemaSource::File(candidate);
        }
    }

    SchemaSource::Builtin
}

/// Load the schema with automatic discovery
pub fn load_schema(explicit: Option<PathBuf>) -> Result<(Schema, SchemaSource), GhoError> {
    let source = find_schema_file(explicit);
    debug!(?source, "loading schema");

    let schema = match &source {
        SchemaSource::File(path) => parse_schema_file(path)?,
        SchemaSource::Builtin => builtin_schema()?,
    };

    Ok((schema, source))
}
