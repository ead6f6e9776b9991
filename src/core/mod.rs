//! Core Logic
//!
//! Documents and the word counting rules, free of any host concerns.

pub mod document;
pub mod words;

pub use document::{Editor, Position, Selection, TextDocument};
pub use words::{count_words, status_text};
