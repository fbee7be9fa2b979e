//! Completion entry point
//!
//! Turns a shell word list and cursor index into a sorted list of candidates.

use crate::completion::matcher::{matching_children, matching_flags};
use crate::completion::tree::{build_tree, CompletionNode};
use crate::completion::walker::{split_flag_token, walk};
use crate::error::SchemaResult;
use crate::schema::Schema;
use std::sync::OnceLock;
use tracing::debug;

/// Executable suffix stripped from the program token
const EXE_SUFFIX: &str = ".exe";

/// Resolves completion requests against a schema
///
/// The completion tree is built on the first request and reused for every
/// request after it. A failed build is kept and returned again each time.
pub struct Completer {
    schema: Schema,
    tree: OnceLock<SchemaResult<CompletionNode>>,
}

impl Completer {
    /// Create a completer; the tree is built lazily
    pub fn new(schema: Schema) -> Self {
        Completer {
            schema,
            tree: OnceLock::new(),
        }
    }

    /// Name the program token is matched against
    pub fn program_name(&self) -> &str {
        &self.schema.name
    }

    /// The completion tree, building it on first use
    pub fn tree(&self) -> SchemaResult<&CompletionNode> {
        self.tree
            .get_or_init(|| build_tree(&self.schema))
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Compute completion candidates for the word at `cword`
    ///
    /// `cword` of `-1` means the last word; values past the end mean a new,
    /// empty word. `words[0]` is skipped when it names the program.
    pub fn resolve<S: AsRef<str>>(&self, cword: i64, words: &[S]) -> SchemaResult<Vec<String>> {
        if words.is_empty() {
            return Ok(Vec::new());
        }

        let cword = match normalize_cword(cword, words.len()) {
            Some(cword) => cword,
            None => return Ok(Vec::new()),
        };

        let tree = self.tree()?;

        let start = if is_program_name(words[0].as_ref(), self.program_name()) {
            1
        } else {
            0
        };

        let walked = walk(tree, words, start, cword);
        if walked.needs_value {
            debug!(cword, "cursor is a flag value; nothing to complete");
            return Ok(Vec::new());
        }

        let current = words.get(cword).map(|w| w.as_ref()).unwrap_or("");

        if walked.terminator.is_some() || current == "--" {
            debug!(cword, "past option terminator; nothing to complete");
            return Ok(Vec::new());
        }

        if cword > start && follows_value_flag(walked.node, words[cword - 1].as_ref()) {
            return Ok(Vec::new());
        }

        let mut candidates = if current.starts_with('-') {
            matching_flags(walked.node, current)
        } else {
            let mut found = matching_children(walked.node, current);
            found.extend(matching_flags(walked.node, current));
            found
        };
        candidates.sort();

        debug!(
            cword,
            node = walked.node.name(),
            prefix = current,
            count = candidates.len(),
            "resolved completion"
        );

        Ok(candidates)
    }
}

/// Clamp the cursor index into `0..=len`; `None` when no word can be addressed
fn normalize_cword(cword: i64, len: usize) -> Option<usize> {
    let cword = if cword < 0 { len as i64 - 1 } else { cword };
    if cword < 0 {
        return None;
    }
    Some((cword as usize).min(len))
}

/// Whether `word` is a flag, without an inline value, that consumes the next word
fn follows_value_flag(node: &CompletionNode, word: &str) -> bool {
    if !word.starts_with('-') {
        return false;
    }
    let (flag, has_inline_value) = split_flag_token(word);
    !has_inline_value && node.flag(flag).is_some_and(|spec| spec.takes_value)
}

/// Whether `word` invokes `program`
///
/// Any directory part and a trailing `.exe` are ignored; comparison is
/// case-insensitive.
pub fn is_program_name(word: &str, program: &str) -> bool {
    let base = word.rsplit(['/', '\\']).next().unwrap_or(word);
    strip_exe_suffix(base).eq_ignore_ascii_case(program)
}

fn strip_exe_suffix(name: &str) -> &str {
    let cut = name.len().saturating_sub(EXE_SUFFIX.len());
    match name.get(cut..) {
        Some(suffix) if cut > 0 && suffix.eq_ignore_ascii_case(EXE_SUFFIX) => &name[..cut],
        _ => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SchemaError;
    use crate::schema::parse_schema;

    fn completer() -> Completer {
        let schema = parse_schema(
            r#"
name: gho
flags:
  - {name: site, short: s, global: true}
  - {name: json, type: bool, global: true}
commands:
  - name: posts
    aliases: [post]
    commands:
      - name: list
        aliases: [ls]
        flags: [{name: limit, type: int}]
      - name: get
  - name: pages
  - name: site
"#,
        )
        .unwrap();
        Completer::new(schema)
    }

    #[test]
    fn test_is_program_name() {
        assert!(is_program_name("gho", "gho"));
        assert!(is_program_name("/usr/local/bin/gho", "gho"));
        assert!(is_program_name("GHO.EXE", "gho"));
        assert!(is_program_name(r"C:\Tools\gho.exe", "gho"));
        assert!(!is_program_name("posts", "gho"));
        assert!(!is_program_name(".exe", "gho"));
        assert!(!is_program_name("gho.exe.bak", "gho"));
    }

    #[test]
    fn test_normalize_cword() {
        assert_eq!(normalize_cword(-1, 3), Some(2));
        assert_eq!(normalize_cword(-1, 0), None);
        assert_eq!(normalize_cword(10, 3), Some(3));
        assert_eq!(normalize_cword(1, 3), Some(1));
    }

    #[test]
    fn test_empty_words() {
        let words: Vec<String> = Vec::new();
        assert!(completer().resolve(-1, &words).unwrap().is_empty());
        assert!(completer().resolve(0, &words).unwrap().is_empty());
    }

    #[test]
    fn test_new_word_offers_commands_and_flags() {
        let result = completer().resolve(1, &["gho"]).unwrap();
        assert_eq!(
            result,
            vec!["--json", "--site", "-s", "pages", "post", "posts", "site"]
        );
    }

    #[test]
    fn test_dash_prefix_offers_only_flags() {
        let result = completer().resolve(-1, &["gho", "posts", "list", "--"]).unwrap();
        assert!(result.is_empty());

        let result = completer().resolve(-1, &["gho", "posts", "list", "-"]).unwrap();
        assert_eq!(result, vec!["--json", "--limit", "--site", "-s"]);
    }

    #[test]
    fn test_cursor_after_value_flag_is_empty() {
        assert!(completer().resolve(2, &["gho", "--site"]).unwrap().is_empty());
        assert!(completer().resolve(2, &["gho", "-s", ""]).unwrap().is_empty());
        assert!(completer()
            .resolve(3, &["gho", "posts", "--site", "bl"])
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_value_flag_after_consumed_value() {
        // The second --site is walked as the first one's value
        let result = completer()
            .resolve(3, &["gho", "--site", "--site", ""])
            .unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_inline_value_is_complete() {
        let result = completer().resolve(2, &["gho", "--site=blog", "po"]).unwrap();
        assert_eq!(result, vec!["post", "posts"]);
    }

    #[test]
    fn test_boolean_flag_before_cursor() {
        let result = completer().resolve(2, &["gho", "--json", "pa"]).unwrap();
        assert_eq!(result, vec!["pages"]);
    }

    #[test]
    fn test_without_program_token() {
        let result = completer().resolve(1, &["posts", "g"]).unwrap();
        assert_eq!(result, vec!["get"]);
    }

    #[test]
    fn test_cword_zero_with_program_token() {
        let result = completer().resolve(0, &["gho"]).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_cword_past_end_is_new_word() {
        let result = completer().resolve(99, &["gho", "posts"]).unwrap();
        assert_eq!(
            result,
            vec!["--json", "--site", "-s", "get", "list", "ls"]
        );
    }

    #[test]
    fn test_build_failure_is_replayed() {
        let schema = parse_schema("flags: [{name: site, type: nope}]").unwrap();
        let completer = Completer::new(schema);

        let first = completer.resolve(1, &["gho", ""]).unwrap_err();
        let second = completer.resolve(1, &["gho", ""]).unwrap_err();
        assert_eq!(first, second);
        assert!(matches!(first, SchemaError::InvalidFlagType { .. }));
    }

    #[test]
    fn test_tree_is_built_once() {
        let completer = completer();
        let first = completer.tree().unwrap() as *const CompletionNode;
        completer.resolve(1, &["gho", "p"]).unwrap();
        let second = completer.tree().unwrap() as *const CompletionNode;
        assert_eq!(first, second);
    }
}
