//! Extension Lifecycle
//!
//! Registers the commands and wires the word counter to the host.

use std::sync::{Arc, Mutex};

use anyhow::Result;

use crate::commands::CommandRegistry;
use crate::core::document::utf16_len;
use crate::counter::{ChangeWatcher, DisplayState, WordCounter};
use crate::host::{Disposable, Host, lock};

pub const SAY_HELLO: &str = "extension.sayHello";
pub const COUNT_SELECTION: &str = "extension.countSelection";
pub const WORD_COUNTER: &str = "extension.wordCounter";

/// Every command contributed by [`activate`]
pub const COMMANDS: [&str; 3] = [SAY_HELLO, COUNT_SELECTION, WORD_COUNTER];

/// A running extension. Call [`Extension::deactivate`] to tear it down.
#[derive(Debug)]
pub struct Extension {
    word_counter: Arc<Mutex<WordCounter>>,
    controller: ChangeWatcher,
    registrations: Disposable,
}

/// Register the commands on `commands` and start tracking word counts in `host`
pub fn activate(host: Arc<dyn Host>, commands: &CommandRegistry) -> Result<Extension> {
    log::info!("package activated");

    let word_counter = Arc::new(Mutex::new(WordCounter::new(host.clone())));
    let mut registrations = Vec::new();

    let result = register_commands(&host, commands, &word_counter, &mut registrations);
    if let Err(e) = result {
        Disposable::from_all(registrations).dispose();
        return Err(e);
    }

    let controller = ChangeWatcher::new(&word_counter, host.as_ref());

    Ok(Extension {
        word_counter,
        controller,
        registrations: Disposable::from_all(registrations),
    })
}

fn register_commands(
    host: &Arc<dyn Host>,
    commands: &CommandRegistry,
    word_counter: &Arc<Mutex<WordCounter>>,
    registrations: &mut Vec<Disposable>,
) -> Result<()> {
    let hello_host = host.clone();
    registrations.push(commands.register_command(SAY_HELLO, move || {
        log::info!("Hello World!");
        hello_host.show_information_message("Hello World!");
    })?);

    let selection_host = host.clone();
    registrations.push(commands.register_command(COUNT_SELECTION, move || {
        let Some(editor) = selection_host.active_editor() else {
            return;
        };
        let length = utf16_len(editor.selected_text());
        selection_host.show_information_message(&format!("Selected characters: {}", length));
    })?);

    let counter = Arc::downgrade(word_counter);
    registrations.push(commands.register_command(WORD_COUNTER, move || {
        if let Some(counter) = counter.upgrade() {
            lock(&counter).update_word_count();
        }
    })?);

    Ok(())
}

impl Extension {
    pub fn word_counter(&self) -> &Arc<Mutex<WordCounter>> {
        &self.word_counter
    }

    pub fn display_state(&self) -> DisplayState {
        lock(&self.word_counter).display_state().clone()
    }

    /// Unsubscribe, release the status item and unregister the commands
    pub fn deactivate(&mut self) {
        if !self.controller.is_subscribed() && self.registrations.is_disposed() {
            return;
        }
        self.controller.shutdown();
        lock(&self.word_counter).dispose();
        self.registrations.dispose();
        log::info!("package deactivated");
    }
}
