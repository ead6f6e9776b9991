//! Document Model
//!
//! Read-only view of the documents a host hands to the word counter.

use std::path::Path;

/// Language identifier of markdown content
pub const MARKDOWN: &str = "markdown";

/// Language identifier used for anything that is not recognised
pub const PLAINTEXT: &str = "plaintext";

/// Zero-based position; `character` counts UTF-16 code units like LSP does
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// A text selection. `anchor` may come after `active`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub anchor: Position,
    pub active: Position,
}

impl Selection {
    pub fn new(anchor: Position, active: Position) -> Self {
        Self { anchor, active }
    }

    pub fn is_empty(&self) -> bool {
        self.anchor == self.active
    }

    /// Start and end in document order
    pub fn ordered(&self) -> (Position, Position) {
        if self.anchor <= self.active {
            (self.anchor, self.active)
        } else {
            (self.active, self.anchor)
        }
    }
}

/// A document as seen by the word counter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDocument {
    pub uri: String,
    pub language_id: String,
    pub text: String,
}

impl TextDocument {
    pub fn new(
        uri: impl Into<String>,
        language_id: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            uri: uri.into(),
            language_id: language_id.into(),
            text: text.into(),
        }
    }

    pub fn is_markdown(&self) -> bool {
        self.language_id == MARKDOWN
    }

    /// Byte offset of `position`, clamped to the end of its line or the document
    pub fn offset_at(&self, position: Position) -> usize {
        let mut line_start = 0;
        for _ in 0..position.line {
            match self.text[line_start..].find('\n') {
                Some(idx) => line_start += idx + 1,
                None => return self.text.len(),
            }
        }

        let rest = &self.text[line_start..];
        let line = match rest.find('\n') {
            Some(idx) => rest[..idx].strip_suffix('\r').unwrap_or(&rest[..idx]),
            None => rest,
        };

        let mut units = 0u32;
        for (idx, ch) in line.char_indices() {
            if units >= position.character {
                return line_start + idx;
            }
            units += ch.len_utf16() as u32;
        }
        line_start + line.len()
    }

    /// Text covered by `selection`
    pub fn text_in(&self, selection: &Selection) -> &str {
        let (start, end) = selection.ordered();
        let start = self.offset_at(start);
        let end = self.offset_at(end);
        &self.text[start..end]
    }
}

/// The focused editor: a document and where the cursor is in it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Editor {
    pub document: TextDocument,
    pub selection: Selection,
}

impl Editor {
    pub fn new(document: TextDocument) -> Self {
        Self {
            document,
            selection: Selection::default(),
        }
    }

    pub fn selected_text(&self) -> &str {
        self.document.text_in(&self.selection)
    }
}

/// Guess a language identifier from a file extension
pub fn language_id_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("md" | "markdown" | "mdown" | "mkd" | "mkdn") => MARKDOWN,
        _ => PLAINTEXT,
    }
}

/// Length of `text` in UTF-16 code units
pub fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(text: &str) -> TextDocument {
        TextDocument::new("file:///notes.md", MARKDOWN, text)
    }

    #[test]
    fn test_offset_at_clamps() {
        let document = doc("ab\ncd");
        assert_eq!(document.offset_at(Position::new(0, 0)), 0);
        assert_eq!(document.offset_at(Position::new(0, 9)), 2);
        assert_eq!(document.offset_at(Position::new(1, 1)), 4);
        assert_eq!(document.offset_at(Position::new(7, 0)), 5);
    }

    #[test]
    fn test_offset_at_counts_utf16_units() {
        // U+1F600 takes two UTF-16 units and four bytes
        let document = doc("\u{1F600}x");
        assert_eq!(document.offset_at(Position::new(0, 2)), 4);
        assert_eq!(document.offset_at(Position::new(0, 3)), 5);
    }

    #[test]
    fn test_text_in_reversed_selection() {
        let document = doc("hello\nworld");
        let selection = Selection::new(Position::new(1, 3), Position::new(0, 3));
        assert_eq!(document.text_in(&selection), "lo\nwor");
    }

    #[test]
    fn test_text_in_skips_carriage_return() {
        let document = doc("one\r\ntwo");
        let selection = Selection::new(Position::new(0, 0), Position::new(0, 10));
        assert_eq!(document.text_in(&selection), "one");
    }

    #[test]
    fn test_language_id_for_path() {
        assert_eq!(language_id_for_path(Path::new("README.md")), MARKDOWN);
        assert_eq!(language_id_for_path(Path::new("notes.MARKDOWN")), MARKDOWN);
        assert_eq!(language_id_for_path(Path::new("notes.txt")), PLAINTEXT);
        assert_eq!(language_id_for_path(Path::new("Makefile")), PLAINTEXT);
    }

    #[test]
    fn test_utf16_len() {
        assert_eq!(utf16_len("abc"), 3);
        assert_eq!(utf16_len("\u{1F600}"), 2);
    }
}
