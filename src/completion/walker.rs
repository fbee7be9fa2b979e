//! Token walker
//!
//! Replays the words before the cursor against the completion tree to find
//! the command level the cursor is in, whether the cursor sits in a flag's
//! value slot, and whether a `--` terminator was passed.

use crate::completion::tree::CompletionNode;
use tracing::trace;

/// Where the cursor ended up after walking the command line
#[derive(Debug, Clone, Copy)]
pub struct WalkResult<'a> {
    /// Deepest command node reached
    pub node: &'a CompletionNode,

    /// Index of the `--` terminator, if one was seen
    pub terminator: Option<usize>,

    /// The cursor is the value slot of the preceding flag
    pub needs_value: bool,
}

/// Split a flag word on its first `=`
///
/// Returns the flag token and whether an inline value was attached.
pub fn split_flag_token(word: &str) -> (&str, bool) {
    match word.split_once('=') {
        Some((flag, _)) => (flag, true),
        None => (word, false),
    }
}

/// Walk `words[start..cword]` from the root node
pub fn walk<'a, S: AsRef<str>>(
    root: &'a CompletionNode,
    words: &[S],
    start: usize,
    cword: usize,
) -> WalkResult<'a> {
    let mut node = root;
    let mut i = start;

    while i < cword && i < words.len() {
        let word = words[i].as_ref();

        if word == "--" {
            trace!(index = i, "option terminator");
            return WalkResult {
                node,
                terminator: Some(i),
                needs_value: false,
            };
        }

        if word.starts_with('-') {
            let (flag, has_inline_value) = split_flag_token(word);
            if has_inline_value {
                i += 1;
                continue;
            }

            match node.flag(flag) {
                Some(spec) if spec.takes_value => {
                    if i + 1 == cword {
                        trace!(flag, "cursor is in flag value slot");
                        return WalkResult {
                            node,
                            terminator: None,
                            needs_value: true,
                        };
                    }
                    i += 2;
                }
                _ => i += 1,
            }
            continue;
        }

        if let Some(child) = node.child(word) {
            trace!(command = child.name(), "descending");
            node = child;
        }
        i += 1;
    }

    WalkResult {
        node,
        terminator: None,
        needs_value: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::tree::build_tree;
    use crate::schema::parse_schema;

    fn tree() -> CompletionNode {
        let schema = parse_schema(
            r#"
flags:
  - {name: site, short: s, global: true}
  - {name: json, type: bool, global: true}
commands:
  - name: posts
    aliases: [post]
    commands:
      - name: list
        aliases: [ls]
      - name: get
"#,
        )
        .unwrap();
        build_tree(&schema).unwrap()
    }

    #[test]
    fn test_split_flag_token() {
        assert_eq!(split_flag_token("--site=myblog"), ("--site", true));
        assert_eq!(split_flag_token("--json"), ("--json", false));
        assert_eq!(split_flag_token("--site="), ("--site", true));
        assert_eq!(split_flag_token("-s=a=b"), ("-s", true));
    }

    #[test]
    fn test_descends_through_aliases() {
        let root = tree();
        let words = ["gho", "post", "ls", ""];
        let result = walk(&root, &words, 1, 3);
        assert_eq!(result.node.name(), "list");
        assert!(!result.needs_value);
        assert_eq!(result.terminator, None);
    }

    #[test]
    fn test_unknown_words_do_not_move() {
        let root = tree();
        let words = ["gho", "posts", "whatever", "list", ""];
        let result = walk(&root, &words, 1, 4);
        assert_eq!(result.node.name(), "list");

        let words = ["gho", "nope", "posts", ""];
        let result = walk(&root, &words, 1, 3);
        assert_eq!(result.node.name(), "posts");
    }

    #[test]
    fn test_value_flag_consumes_next_word() {
        let root = tree();
        // "posts" is the value of --site, not a command
        let words = ["gho", "--site", "posts", ""];
        let result = walk(&root, &words, 1, 3);
        assert_eq!(result.node.name(), "gho");
        assert!(!result.needs_value);
    }

    #[test]
    fn test_inline_value_does_not_consume() {
        let root = tree();
        let words = ["gho", "--site=blog", "posts", ""];
        let result = walk(&root, &words, 1, 3);
        assert_eq!(result.node.name(), "posts");
    }

    #[test]
    fn test_boolean_flag_does_not_consume() {
        let root = tree();
        let words = ["gho", "--json", "posts", ""];
        let result = walk(&root, &words, 1, 3);
        assert_eq!(result.node.name(), "posts");
    }

    #[test]
    fn test_cursor_after_value_flag() {
        let root = tree();
        let words = ["gho", "posts", "-s"];
        let result = walk(&root, &words, 1, 3);
        assert!(result.needs_value);
        assert_eq!(result.node.name(), "posts");
    }

    #[test]
    fn test_terminator_stops_walk() {
        let root = tree();
        let words = ["gho", "posts", "--", "list", ""];
        let result = walk(&root, &words, 1, 4);
        assert_eq!(result.terminator, Some(2));
        assert_eq!(result.node.name(), "posts");
    }

    #[test]
    fn test_walk_stops_at_cursor() {
        let root = tree();
        let words = ["gho", "posts", "list"];
        let result = walk(&root, &words, 1, 2);
        assert_eq!(result.node.name(), "posts");
    }
}
