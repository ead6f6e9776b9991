//! Word Count Indicator
//!
//! The word counter engine and the controller that keeps it refreshed.

pub mod watcher;
pub mod word_counter;

pub use watcher::ChangeWatcher;
pub use word_counter::{DisplayState, WordCounter};
