//! Comment stripping for markup, C-family, SQL and shell/Python sources.

use regex::Regex;
use std::sync::LazyLock;

static RE_HTML: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());
static RE_BLOCK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").unwrap());
// `://` in URLs is not a comment.
static RE_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)(^|[^:])//.*$").unwrap());
static RE_SQL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)(^|[ \t])--[ \t].*$").unwrap());

/// Markdown header: one to six `#` followed by a space.
fn is_markdown_header(rest: &str) -> bool {
    let level = rest.chars().take_while(|&c| c == '#').count();
    level <= 6 && rest[level..].starts_with(' ')
}

/// Full-line `#` comment that is not a markdown header.
pub fn is_hash_comment(line: &str) -> bool {
    let t = line.trim_start();
    t.starts_with('#') && !is_markdown_header(t)
}

/// Drop full-line `#` comments, keeping markdown headers.
pub fn strip_hash_comments(text: &str) -> String {
    if !text.split('\n').any(is_hash_comment) {
        return text.to_string();
    }
    text.split('\n')
        .filter(|line| !is_hash_comment(line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Remove all recognized comment forms.
pub fn strip(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let result = RE_HTML.replace_all(text, "");
    let result = RE_BLOCK.replace_all(&result, "");
    let result = RE_LINE.replace_all(&result, "$1");
    let result = RE_SQL.replace_all(&result, "$1");
    strip_hash_comments(&result)
}
