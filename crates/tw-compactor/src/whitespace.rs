//! Whitespace normalization.

use regex::Regex;
use std::sync::LazyLock;

static RE_TRAILING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)[ \t\r]+$").unwrap());
static RE_MULTI_NEWLINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());
static RE_INTERIOR_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\S)[ \t]{2,}").unwrap());

/// Strip trailing whitespace per line (3+ newlines → one blank line).
pub fn strip_redundant_whitespace(text: &str) -> String {
    let result = RE_TRAILING.replace_all(text, "");
    RE_MULTI_NEWLINE.replace_all(&result, "\n\n").into_owned()
}

/// Collapse runs of spaces/tabs after a non-space character. Leading
/// indentation is left alone.
pub fn collapse_interior_spaces(text: &str) -> String {
    RE_INTERIOR_SPACE.replace_all(text, "$1 ").into_owned()
}

/// Full normalization pass. With `preserve_formatting` interior space runs
/// (column alignment, tables) are kept.
pub fn normalize(text: &str, preserve_formatting: bool) -> String {
    if text.is_empty() {
        return String::new();
    }
    let mut result = strip_redundant_whitespace(text);
    if !preserve_formatting {
        result = collapse_interior_spaces(&result);
    }
    result.trim().to_string()
}
