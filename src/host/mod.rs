//! Host Platform
//!
//! What the extension needs from the editor it runs in: the active editor,
//! a status indicator, information messages and two notification streams.

pub mod event;
pub mod workspace;

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use crate::core::{Editor, Selection, TextDocument};

pub use event::{Disposable, Emitter};
pub use workspace::{HostEvent, StatusSnapshot, WorkspaceHost};

/// Which side of the status bar an item lives on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusAlignment {
    Left,
    Right,
}

/// Payload of a selection change notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionChangeEvent {
    pub uri: String,
    pub selection: Selection,
}

/// Payload of an active editor change notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveEditorChangeEvent {
    pub uri: Option<String>,
}

/// A persistent status indicator owned by the host
pub trait StatusItem: Send {
    fn set_text(&mut self, text: &str);
    fn show(&mut self);
    fn hide(&mut self);
    fn dispose(&mut self);
}

/// The editor the extension is running in
pub trait Host: Send + Sync {
    fn active_editor(&self) -> Option<Editor>;

    fn create_status_item(&self, alignment: StatusAlignment) -> Box<dyn StatusItem>;

    fn show_information_message(&self, message: &str);

    fn on_did_change_selection(&self) -> &Emitter<SelectionChangeEvent>;

    fn on_did_change_active_editor(&self) -> &Emitter<ActiveEditorChangeEvent>;

    fn active_document(&self) -> Option<TextDocument> {
        self.active_editor().map(|editor| editor.document)
    }
}

/// Lock `mutex`, recovering the data if a holder panicked
pub(crate) fn lock<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
