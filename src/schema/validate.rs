//! Schema validation
//!
//! A schema must pass validation before a completion tree is built from it.
//! The first violation found is reported and nothing is built.

use crate::error::{SchemaError, SchemaResult};
use crate::schema::types::{CommandDef, FlagDef, Schema};

/// Flag types the completion tree understands
const FLAG_TYPES: &[&str] = &[
    "string", "bool", "boolean", "count", "int", "integer", "float", "duration", "enum", "list",
];

/// Validate a complete schema
pub fn validate_schema(schema: &Schema) -> SchemaResult<()> {
    let root = schema.name.as_str();

    for flag in &schema.flags {
        validate_flag(root, flag)?;
    }

    for command in &schema.commands {
        validate_command(root, command)?;
    }

    Ok(())
}

/// Validate a command and all of its descendants
fn validate_command(parent_path: &str, command: &CommandDef) -> SchemaResult<()> {
    if command.name.is_empty() {
        return Err(SchemaError::EmptyCommandName(parent_path.to_string()));
    }

    let path = format!("{} {}", parent_path, command.name);

    for name in std::iter::once(&command.name).chain(&command.aliases) {
        validate_name(&path, name)?;
    }

    for flag in &command.flags {
        validate_flag(&path, flag)?;
    }

    for child in &command.commands {
        validate_command(&path, child)?;
    }

    Ok(())
}

/// Validate a single flag definition
fn validate_flag(command_path: &str, flag: &FlagDef) -> SchemaResult<()> {
    if flag.name.is_empty() {
        return Err(SchemaError::EmptyFlagName(command_path.to_string()));
    }

    for name in std::iter::once(&flag.name).chain(&flag.aliases) {
        validate_name(command_path, name)?;
    }

    if let Some(negated) = &flag.negated {
        validate_name(command_path, negated.strip_prefix("--").unwrap_or(negated))?;
    }

    validate_flag_type(flag)?;

    if let Some(short) = &flag.short {
        let mut chars = short.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c != '-' && !c.is_whitespace() => {}
            _ => {
                return Err(SchemaError::InvalidShort {
                    flag: flag.name.clone(),
                    short: short.clone(),
                })
            }
        }
    }

    if flag.negatable && flag.takes_value() {
        return Err(SchemaError::NegatableValueFlag(flag.name.clone()));
    }

    Ok(())
}

/// Validate a flag type string
fn validate_flag_type(flag: &FlagDef) -> SchemaResult<()> {
    if FLAG_TYPES.contains(&flag.flag_type.as_str()) {
        Ok(())
    } else {
        Err(SchemaError::InvalidFlagType {
            flag: flag.name.clone(),
            kind: flag.flag_type.clone(),
        })
    }
}

/// Names become completion candidates, so they must be single words that
/// cannot be mistaken for flags
fn validate_name(command_path: &str, name: &str) -> SchemaResult<()> {
    if name.is_empty() || name.starts_with('-') || name.chars().any(char::is_whitespace) {
        return Err(SchemaError::InvalidName {
            command: command_path.to_string(),
            name: name.to_string(),
        });
    }
    Ok(())
}
