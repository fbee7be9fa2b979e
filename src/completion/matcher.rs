//! Candidate matching by prefix

use crate::completion::tree::CompletionNode;

/// Child command names and aliases starting with `prefix`
pub fn matching_children(node: &CompletionNode, prefix: &str) -> Vec<String> {
    node.child_names()
        .filter(|name| name.starts_with(prefix))
        .map(str::to_string)
        .collect()
}

/// Flag tokens starting with `prefix`
pub fn matching_flags(node: &CompletionNode, prefix: &str) -> Vec<String> {
    node.flag_tokens()
        .filter(|token| token.starts_with(prefix))
        .map(str::to_string)
        .collect()
}
