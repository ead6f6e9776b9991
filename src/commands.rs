//! Command Registry
//!
//! Named zero-argument actions the host can invoke.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::{Result, bail};

use crate::host::{Disposable, lock};

type Action = Arc<dyn Fn() + Send + Sync>;

/// Maps command identifiers to actions. Clones share the same table.
#[derive(Clone, Default)]
pub struct CommandRegistry {
    commands: Arc<Mutex<HashMap<String, Action>>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `id` to `action`; disposing the handle removes the binding
    pub fn register_command<F>(&self, id: &str, action: F) -> Result<Disposable>
    where
        F: Fn() + Send + Sync + 'static,
    {
        let mut commands = lock(&self.commands);
        if commands.contains_key(id) {
            bail!("command '{}' already exists", id);
        }
        commands.insert(id.to_string(), Arc::new(action));
        log::debug!("Registered command {}", id);

        let registry = Arc::downgrade(&self.commands);
        let id = id.to_string();
        Ok(Disposable::new(move || {
            if let Some(registry) = registry.upgrade() {
                lock(&registry).remove(&id);
            }
        }))
    }

    /// Run the action bound to `id`
    pub fn execute(&self, id: &str) -> Result<()> {
        // Cloned out so the action may use the registry itself
        let action = lock(&self.commands).get(id).cloned();
        match action {
            Some(action) => {
                log::debug!("Executing command {}", id);
                action();
                Ok(())
            }
            None => bail!("command '{}' not found", id),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        lock(&self.commands).contains_key(id)
    }

    /// Registered identifiers, sorted
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = lock(&self.commands).keys().cloned().collect();
        ids.sort();
        ids
    }
}

impl std::fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("commands", &self.ids())
            .finish()
    }
}
