use std::fmt;
use std::sync::Arc;

use crate::core::{TextDocument, count_words, status_text};
use crate::host::{Host, StatusAlignment, StatusItem};

/// What the word count indicator currently shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayState {
    Hidden,
    Visible(String),
}

impl DisplayState {
    pub fn text(&self) -> Option<&str> {
        match self {
            DisplayState::Hidden => None,
            DisplayState::Visible(text) => Some(text.as_str()),
        }
    }
}

/// Keeps a status indicator in sync with the word count of the active
/// markdown document
pub struct WordCounter {
    host: Arc<dyn Host>,
    status_item: Option<Box<dyn StatusItem>>,
    state: DisplayState,
}

impl WordCounter {
    pub fn new(host: Arc<dyn Host>) -> Self {
        Self {
            host,
            status_item: None,
            state: DisplayState::Hidden,
        }
    }

    /// Refresh from whatever document the host has focused
    pub fn update_word_count(&mut self) {
        let document = self.host.active_document();
        self.refresh(document.as_ref());
    }

    /// Recompute the indicator for `document`.
    ///
    /// Hidden without a document or for anything that is not markdown.
    pub fn refresh(&mut self, document: Option<&TextDocument>) {
        let next = match document {
            Some(document) if document.is_markdown() => {
                DisplayState::Visible(status_text(count_words(&document.text)))
            }
            _ => DisplayState::Hidden,
        };

        let host = &self.host;
        let item = self
            .status_item
            .get_or_insert_with(|| host.create_status_item(StatusAlignment::Left));

        match &next {
            DisplayState::Hidden => item.hide(),
            DisplayState::Visible(text) => {
                item.set_text(text);
                item.show();
            }
        }

        if next != self.state {
            log::debug!("Word count indicator: {:?}", next);
        }
        self.state = next;
    }

    pub fn display_state(&self) -> &DisplayState {
        &self.state
    }

    /// Release the status item; a later refresh creates a new one
    pub fn dispose(&mut self) {
        if let Some(mut item) = self.status_item.take() {
            item.dispose();
        }
        self.state = DisplayState::Hidden;
    }
}

impl fmt::Debug for WordCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WordCounter")
            .field("has_status_item", &self.status_item.is_some())
            .field("state", &self.state)
            .finish()
    }
}
