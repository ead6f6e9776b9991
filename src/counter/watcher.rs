use std::sync::{Arc, Mutex, Weak};

use super::WordCounter;
use crate::host::{Disposable, Host, lock};

/// Refreshes a [`WordCounter`] whenever the selection or the active editor
/// changes.
#[derive(Debug)]
pub struct ChangeWatcher {
    subscriptions: Disposable,
}

impl ChangeWatcher {
    /// Refresh once, then subscribe to both notification streams of `host`
    pub fn new(word_counter: &Arc<Mutex<WordCounter>>, host: &dyn Host) -> Self {
        lock(word_counter).update_word_count();

        let on_selection = {
            let counter = Arc::downgrade(word_counter);
            host.on_did_change_selection()
                .subscribe(move |_| on_event(&counter))
        };
        let on_active_editor = {
            let counter = Arc::downgrade(word_counter);
            host.on_did_change_active_editor()
                .subscribe(move |_| on_event(&counter))
        };

        Self {
            subscriptions: Disposable::from_all([on_selection, on_active_editor]),
        }
    }

    pub fn is_subscribed(&self) -> bool {
        !self.subscriptions.is_disposed()
    }

    /// Drop both subscriptions; calling this again does nothing
    pub fn shutdown(&mut self) {
        self.subscriptions.dispose();
    }
}

fn on_event(counter: &Weak<Mutex<WordCounter>>) {
    if let Some(counter) = counter.upgrade() {
        lock(&counter).update_word_count();
    }
}
