//! Word Counting
//!
//! Regex-based counting used by the status indicator. This is a lightweight
//! cleanup heuristic, not a markup parser or a linguistic tokenizer.

use std::sync::LazyLock;

use regex::Regex;

/// Tag-like noise: a `<`, a space, anything but `>`, then another `<`.
static TAG_LIKE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(< ([^>]+)<)").expect("tag pattern is valid"));

/// ECMAScript whitespace: includes the byte order mark, excludes NEL (U+0085).
static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\t\n\x0B\x0C\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}]+")
        .expect("whitespace pattern is valid")
});

/// Count the words in `text`.
///
/// Markup noise is stripped, whitespace runs collapse to a single space,
/// the result is trimmed and split on that space. Punctuation standing on
/// its own between whitespace counts as a word.
pub fn count_words(text: &str) -> usize {
    let stripped = TAG_LIKE.replace_all(text, "");
    let collapsed = WHITESPACE_RUN.replace_all(&stripped, " ");
    let trimmed = collapsed.trim_matches(' ');

    if trimmed.is_empty() {
        0
    } else {
        trimmed.split(' ').count()
    }
}

/// Status indicator text for a word count
pub fn status_text(count: usize) -> String {
    if count == 1 {
        "1 Word".to_string()
    } else {
        format!("{} Words", count)
    }
}
