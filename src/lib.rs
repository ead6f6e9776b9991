//! Markdown Word Count
//!
//! Live word count for markdown documents, written against a small host
//! interface so any editor can drive it.
//!
//! This library provides:
//! - Word counting and the status indicator that shows it
//! - The controller that refreshes the count on editor changes
//! - Command registration and the extension lifecycle
//! - An LSP front end and a terminal front end

pub mod commands;
pub mod config;
pub mod core;
pub mod counter;
pub mod extension;
pub mod host;
pub mod lsp;
pub mod terminal;

// Re-exports for clean public API
pub use commands::CommandRegistry;
pub use config::Config;
pub use crate::core::{TextDocument, count_words};
pub use counter::{ChangeWatcher, DisplayState, WordCounter};
pub use extension::{Extension, activate};
pub use host::{Host, WorkspaceHost};
