//! In-memory workspace host
//!
//! Keeps the open documents, the active editor and its selection, and turns
//! status item changes and messages into [`HostEvent`]s on a channel. The LSP
//! and terminal front ends both drive one of these and forward the events.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use super::{
    ActiveEditorChangeEvent, Emitter, Host, SelectionChangeEvent, StatusAlignment, StatusItem,
    lock,
};
use crate::core::{Editor, Selection, TextDocument};

/// What a status item currently looks like
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSnapshot {
    pub id: u32,
    pub alignment: StatusAlignment,
    pub visible: bool,
    pub text: String,
}

/// Output the front end has to render
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    Status(StatusSnapshot),
    Message(String),
}

#[derive(Debug, Default)]
struct WorkspaceState {
    documents: HashMap<String, TextDocument>,
    active: Option<String>,
    selection: Selection,
}

/// Host backed by an in-memory document table
pub struct WorkspaceHost {
    state: Mutex<WorkspaceState>,
    selection_changed: Emitter<SelectionChangeEvent>,
    active_changed: Emitter<ActiveEditorChangeEvent>,
    outbox: mpsc::UnboundedSender<HostEvent>,
    next_item_id: AtomicU32,
}

impl WorkspaceHost {
    pub fn new(outbox: mpsc::UnboundedSender<HostEvent>) -> Self {
        Self {
            state: Mutex::new(WorkspaceState::default()),
            selection_changed: Emitter::new(),
            active_changed: Emitter::new(),
            outbox,
            next_item_id: AtomicU32::new(1),
        }
    }

    /// Host plus the receiving end of its event channel
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<HostEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    /// Store `document` and focus it
    pub fn open_document(&self, document: TextDocument) {
        let uri = document.uri.clone();
        {
            let mut state = lock(&self.state);
            state.documents.insert(uri.clone(), document);
            state.active = Some(uri.clone());
            state.selection = Selection::default();
        }
        log::debug!("Opened {}", uri);
        self.active_changed
            .fire(&ActiveEditorChangeEvent { uri: Some(uri) });
    }

    /// Replace the text of an open document.
    ///
    /// Editing a background document focuses it; editing the focused one is
    /// reported as a selection change. Returns `false` for unknown documents.
    pub fn change_document(&self, uri: &str, text: String) -> bool {
        let (focused, selection) = {
            let mut state = lock(&self.state);
            let Some(document) = state.documents.get_mut(uri) else {
                return false;
            };
            document.text = text;

            let focused = state.active.as_deref() != Some(uri);
            if focused {
                state.active = Some(uri.to_string());
                state.selection = Selection::default();
            }
            (focused, state.selection)
        };

        if focused {
            self.active_changed.fire(&ActiveEditorChangeEvent {
                uri: Some(uri.to_string()),
            });
        } else {
            self.selection_changed.fire(&SelectionChangeEvent {
                uri: uri.to_string(),
                selection,
            });
        }
        true
    }

    /// Forget a document, clearing the active editor if it was focused
    pub fn close_document(&self, uri: &str) {
        let was_active = {
            let mut state = lock(&self.state);
            state.documents.remove(uri);
            let was_active = state.active.as_deref() == Some(uri);
            if was_active {
                state.active = None;
                state.selection = Selection::default();
            }
            was_active
        };

        log::debug!("Closed {}", uri);
        if was_active {
            self.active_changed
                .fire(&ActiveEditorChangeEvent { uri: None });
        }
    }

    /// Move the selection, focusing the document first if needed.
    /// Returns `false` for unknown documents.
    pub fn change_selection(&self, uri: &str, selection: Selection) -> bool {
        let focused = {
            let mut state = lock(&self.state);
            if !state.documents.contains_key(uri) {
                return false;
            }
            let focused = state.active.as_deref() != Some(uri);
            state.active = Some(uri.to_string());
            state.selection = selection;
            focused
        };

        if focused {
            self.active_changed.fire(&ActiveEditorChangeEvent {
                uri: Some(uri.to_string()),
            });
        }
        self.selection_changed.fire(&SelectionChangeEvent {
            uri: uri.to_string(),
            selection,
        });
        true
    }

    pub fn document(&self, uri: &str) -> Option<TextDocument> {
        lock(&self.state).documents.get(uri).cloned()
    }

    pub fn active_uri(&self) -> Option<String> {
        lock(&self.state).active.clone()
    }
}

impl Host for WorkspaceHost {
    fn active_editor(&self) -> Option<Editor> {
        let state = lock(&self.state);
        let uri = state.active.as_ref()?;
        let document = state.documents.get(uri)?.clone();
        Some(Editor {
            document,
            selection: state.selection,
        })
    }

    fn create_status_item(&self, alignment: StatusAlignment) -> Box<dyn StatusItem> {
        let id = self.next_item_id.fetch_add(1, Ordering::Relaxed);
        Box::new(ChannelStatusItem {
            id,
            alignment,
            text: String::new(),
            visible: false,
            published: None,
            outbox: self.outbox.clone(),
        })
    }

    fn show_information_message(&self, message: &str) {
        let _ = self.outbox.send(HostEvent::Message(message.to_string()));
    }

    fn on_did_change_selection(&self) -> &Emitter<SelectionChangeEvent> {
        &self.selection_changed
    }

    fn on_did_change_active_editor(&self) -> &Emitter<ActiveEditorChangeEvent> {
        &self.active_changed
    }
}

/// Status item that publishes a snapshot whenever what it shows changes
struct ChannelStatusItem {
    id: u32,
    alignment: StatusAlignment,
    text: String,
    visible: bool,
    published: Option<StatusSnapshot>,
    outbox: mpsc::UnboundedSender<HostEvent>,
}

impl ChannelStatusItem {
    fn publish(&mut self) {
        let snapshot = StatusSnapshot {
            id: self.id,
            alignment: self.alignment,
            visible: self.visible,
            // Hidden items render nothing, so their text is irrelevant
            text: if self.visible {
                self.text.clone()
            } else {
                String::new()
            },
        };

        if self.published.as_ref() == Some(&snapshot) {
            return;
        }
        // Nothing was ever shown, so there is nothing to hide
        if self.published.is_none() && !snapshot.visible {
            self.published = Some(snapshot);
            return;
        }

        let _ = self.outbox.send(HostEvent::Status(snapshot.clone()));
        self.published = Some(snapshot);
    }
}

impl StatusItem for ChannelStatusItem {
    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        if self.visible {
            self.publish();
        }
    }

    fn show(&mut self) {
        self.visible = true;
        self.publish();
    }

    fn hide(&mut self) {
        self.visible = false;
        self.publish();
    }

    fn dispose(&mut self) {
        self.hide();
    }
}
