//! Completion tree
//!
//! The completion tree is a normalized, immutable view of the schema: every
//! command name and alias maps to its node, and every flag token maps to
//! whether it consumes a value.

use crate::error::SchemaResult;
use crate::schema::{validate_schema, CommandDef, FlagDef, Schema};
use std::collections::HashMap;
use tracing::{debug, trace};

/// How a flag token behaves on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagSpec {
    /// Whether the next word is consumed as the flag's value
    pub takes_value: bool,
}

/// One command level in the completion tree
#[derive(Debug, Clone, Default)]
pub struct CompletionNode {
    /// Primary name of the command (the program name for the root)
    name: String,

    /// Child nodes, in declaration order
    nodes: Vec<CompletionNode>,

    /// Child names and aliases, in registration order
    child_keys: Vec<String>,

    /// Child name or alias to index into `nodes`
    children: HashMap<String, usize>,

    /// Flag tokens visible at this level
    flags: HashMap<String, FlagSpec>,
}

impl CompletionNode {
    /// Primary name of this command
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up a child by name or alias
    pub fn child(&self, name: &str) -> Option<&CompletionNode> {
        self.children.get(name).map(|&idx| &self.nodes[idx])
    }

    /// Look up a flag token such as `--site` or `-s`
    pub fn flag(&self, token: &str) -> Option<FlagSpec> {
        self.flags.get(token).copied()
    }

    /// Every child name and alias, in registration order
    pub fn child_names(&self) -> impl Iterator<Item = &str> {
        self.child_keys.iter().map(String::as_str)
    }

    /// Every flag token visible at this level
    pub fn flag_tokens(&self) -> impl Iterator<Item = &str> {
        self.flags.keys().map(String::as_str)
    }

    /// Space-separated primary-name paths of every reachable command
    pub fn command_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        for node in &self.nodes {
            node.collect_paths(String::new(), &mut paths);
        }
        paths
    }

    fn collect_paths(&self, prefix: String, paths: &mut Vec<String>) {
        let path = if prefix.is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", prefix, self.name)
        };
        paths.push(path.clone());
        for node in &self.nodes {
            node.collect_paths(path.clone(), paths);
        }
    }

    /// Register a child under its name and aliases; the first key wins
    fn add_child(&mut self, node: CompletionNode, keys: &[String]) {
        let idx = self.nodes.len();
        let mut registered = false;

        for key in keys {
            if self.children.contains_key(key) {
                trace!(key = %key, "ignoring duplicate command name");
                continue;
            }
            self.children.insert(key.clone(), idx);
            self.child_keys.push(key.clone());
            registered = true;
        }

        if registered {
            self.nodes.push(node);
        }
    }

    /// Register every token of a flag; the first definition of a token wins
    fn add_flag(&mut self, flag: &FlagDef) {
        for (token, takes_value) in flag.tokens() {
            self.flags.entry(token).or_insert(FlagSpec { takes_value });
        }
    }
}

/// Build the completion tree for a schema
///
/// The schema is validated first; any violation fails the whole build.
pub fn build_tree(schema: &Schema) -> SchemaResult<CompletionNode> {
    validate_schema(schema)?;

    let root = build_node(&schema.name, &schema.flags, &schema.commands, &[]);

    debug!(
        program = %schema.name,
        commands = root.child_keys.len(),
        flags = root.flags.len(),
        "built completion tree"
    );

    Ok(root)
}

fn build_node(
    name: &str,
    flags: &[FlagDef],
    commands: &[CommandDef],
    inherited: &[&FlagDef],
) -> CompletionNode {
    let mut node = CompletionNode {
        name: name.to_string(),
        ..Default::default()
    };

    // Own flags are registered before inherited ones
    for flag in flags.iter().chain(inherited.iter().copied()) {
        node.add_flag(flag);
    }

    let mut passed_down: Vec<&FlagDef> = inherited.to_vec();
    passed_down.extend(flags.iter().filter(|f| f.global));

    for command in commands {
        if command.hidden {
            trace!(command = %command.name, "skipping hidden command");
            continue;
        }

        let child = build_node(&command.name, &command.flags, &command.commands, &passed_down);
        let keys: Vec<String> = std::iter::once(&command.name)
            .chain(&command.aliases)
            .cloned()
            .collect();
        node.add_child(child, &keys);
    }

    node
}
