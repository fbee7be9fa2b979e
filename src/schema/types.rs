//! Command schema types
//!
//! This module defines the data structures that describe the gho command
//! surface: commands, their aliases, nested subcommands and flags.

use serde::{Deserialize, Serialize};

/// Top-level schema structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Schema {
    /// Program name, used to recognise the program token on the command line
    #[serde(default = "default_program_name")]
    pub name: String,

    /// Program usage description (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,

    /// Flags accepted by the program itself
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flags: Vec<FlagDef>,

    /// Top-level commands, in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<CommandDef>,
}

/// A command definition
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CommandDef {
    /// Primary command name
    pub name: String,

    /// Alternative names for the command
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,

    /// Usage description for help text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,

    /// Whether this command is hidden (deprecated or internal)
    #[serde(default)]
    pub hidden: bool,

    /// Flags accepted by this command
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flags: Vec<FlagDef>,

    /// Nested subcommands, in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<CommandDef>,
}

/// A flag definition
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FlagDef {
    /// Long flag name, without the leading `--`
    pub name: String,

    /// Alternative long names, without the leading `--`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,

    /// Short flag (single character)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short: Option<String>,

    /// Flag type (string, bool, count, int, etc.)
    #[serde(rename = "type", default = "default_flag_type")]
    pub flag_type: String,

    /// Whether a `--no-` form is accepted
    #[serde(default)]
    pub negatable: bool,

    /// Explicit name for the negated form
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub negated: Option<String>,

    /// Whether the flag is inherited by every subcommand
    #[serde(default)]
    pub global: bool,

    /// Usage description for help text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,
}

fn default_program_name() -> String {
    "gho".to_string()
}

fn default_flag_type() -> String {
    "string".to_string()
}

impl FlagDef {
    /// Whether the flag consumes the following word as its value
    pub fn takes_value(&self) -> bool {
        !matches!(self.flag_type.as_str(), "bool" | "boolean" | "count")
    }

    /// Every token this flag can be written as on the command line
    ///
    /// The long form comes first, followed by aliases, the short form and
    /// the negated form.
    pub fn tokens(&self) -> Vec<(String, bool)> {
        let takes_value = self.takes_value();
        let mut tokens = vec![(format!("--{}", self.name), takes_value)];

        for alias in &self.aliases {
            tokens.push((format!("--{}", alias), takes_value));
        }

        if let Some(short) = &self.short {
            tokens.push((format!("-{}", short), takes_value));
        }

        if let Some(negated) = self.negated_token() {
            tokens.push((negated, false));
        }

        tokens
    }

    /// The negated token, if the flag is negatable
    pub fn negated_token(&self) -> Option<String> {
        if !self.negatable {
            return None;
        }
        match &self.negated {
            Some(name) if name.starts_with("--") => Some(name.clone()),
            Some(name) => Some(format!("--{}", name)),
            None => Some(format!("--no-{}", self.name)),
        }
    }
}
