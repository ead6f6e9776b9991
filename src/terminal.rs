//! Terminal front end
//!
//! Watches files on disk and prints the word count indicator to stdout.
//! The first file starts out active; whichever file changes last becomes
//! active.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use notify::event::{ModifyKind, RenameMode};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::commands::CommandRegistry;
use crate::core::TextDocument;
use crate::core::document::language_id_for_path;
use crate::counter::DisplayState;
use crate::extension::{self, Extension};
use crate::host::{HostEvent, StatusSnapshot, WorkspaceHost};

/// Events from the file watcher
#[derive(Debug)]
pub enum FileEvent {
    Changed(PathBuf),
    Removed(PathBuf),
    WatcherError(notify::Error),
}

/// A loaded set of files with the extension running over them
pub struct WatchSession {
    host: Arc<WorkspaceHost>,
    commands: CommandRegistry,
    extension: Extension,
    events: mpsc::UnboundedReceiver<HostEvent>,
    paths: HashSet<PathBuf>,
}

impl WatchSession {
    /// Load `files` and activate the extension
    pub fn open(files: &[PathBuf]) -> Result<Self> {
        let (host, events) = WorkspaceHost::channel();
        let host = Arc::new(host);

        let mut paths = HashSet::new();
        let mut documents = Vec::new();
        for file in files {
            let path = file
                .canonicalize()
                .with_context(|| format!("Failed to resolve {}", file.display()))?;
            documents.push(load_document(&path)?);
            paths.insert(path);
        }

        // Opening focuses, so go backwards to leave the first file active
        for document in documents.into_iter().rev() {
            host.open_document(document);
        }

        let commands = CommandRegistry::new();
        let extension = extension::activate(host.clone(), &commands)?;

        let mut session = Self {
            host,
            commands,
            extension,
            events,
            paths,
        };
        // The initial state is reported through `status_line`
        session.drain_output();
        Ok(session)
    }

    pub fn watched_paths(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter().map(PathBuf::as_path)
    }

    pub fn active_path(&self) -> Option<PathBuf> {
        self.host.active_uri().map(PathBuf::from)
    }

    /// Current indicator as one line of output
    pub fn status_line(&self) -> String {
        match self.extension.display_state() {
            DisplayState::Hidden => "(hidden)".to_string(),
            DisplayState::Visible(text) => text,
        }
    }

    /// Run one of the extension's commands
    pub fn execute_command(&self, id: &str) -> Result<()> {
        self.commands.execute(id)
    }

    /// Feed a watcher event into the host
    pub fn apply(&self, event: FileEvent) {
        match event {
            FileEvent::Changed(path) => {
                if !self.paths.contains(&path) {
                    return;
                }
                let document = match load_document(&path) {
                    Ok(document) => document,
                    Err(e) if is_not_found(&e) => {
                        log::info!("{} is gone", path.display());
                        self.host.close_document(&path.display().to_string());
                        return;
                    }
                    Err(e) => {
                        log::warn!("{:#}", e);
                        return;
                    }
                };
                if !self.host.change_document(&document.uri, document.text.clone()) {
                    self.host.open_document(document);
                }
            }
            FileEvent::Removed(path) => {
                if self.paths.contains(&path) {
                    self.host.close_document(&path.display().to_string());
                }
            }
            FileEvent::WatcherError(e) => {
                log::error!("File watcher error: {}", e);
            }
        }
    }

    /// Lines produced since the last call
    pub fn drain_output(&mut self) -> Vec<String> {
        let mut lines = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            lines.push(render(&event));
        }
        lines
    }

    pub fn close(mut self) {
        self.extension.deactivate();
    }
}

/// One line of terminal output for a host event
pub fn render(event: &HostEvent) -> String {
    match event {
        HostEvent::Status(StatusSnapshot {
            visible: true,
            text,
            ..
        }) => text.clone(),
        HostEvent::Status(_) => "(hidden)".to_string(),
        HostEvent::Message(message) => format!("info: {}", message),
    }
}

fn is_not_found(error: &anyhow::Error) -> bool {
    error
        .downcast_ref::<std::io::Error>()
        .is_some_and(|e| e.kind() == std::io::ErrorKind::NotFound)
}

/// Translate a watcher event into per-path file events
pub fn file_events(event: Event) -> Vec<FileEvent> {
    match event.kind {
        EventKind::Modify(ModifyKind::Name(RenameMode::From)) | EventKind::Remove(_) => {
            event.paths.into_iter().map(FileEvent::Removed).collect()
        }
        // Paths are [from, to]
        EventKind::Modify(ModifyKind::Name(RenameMode::Both)) => {
            let mut paths = event.paths.into_iter();
            let mut events: Vec<_> = paths.next().map(FileEvent::Removed).into_iter().collect();
            events.extend(paths.map(FileEvent::Changed));
            events
        }
        EventKind::Create(_) | EventKind::Modify(_) => {
            event.paths.into_iter().map(FileEvent::Changed).collect()
        }
        _ => Vec::new(),
    }
}

fn load_document(path: &Path) -> Result<TextDocument> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(TextDocument::new(
        path.display().to_string(),
        language_id_for_path(path),
        text,
    ))
}

/// Print the indicator for `files`, then keep it updated until Ctrl-C
pub async fn watch(files: &[PathBuf], once: bool) -> Result<()> {
    let mut session = WatchSession::open(files)?;
    println!("{}", session.status_line());

    if once {
        session.close();
        return Ok(());
    }

    let (tx, mut file_events) = mpsc::unbounded_channel();
    let _watcher = start_watching(&session, tx)?;

    loop {
        tokio::select! {
            Some(event) = file_events.recv() => {
                session.apply(event);
                for line in session.drain_output() {
                    println!("{}", line);
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    session.close();
    Ok(())
}

/// Watch the parent directory of every file so replaced files are seen too
fn start_watching(
    session: &WatchSession,
    tx: mpsc::UnboundedSender<FileEvent>,
) -> Result<RecommendedWatcher> {
    let mut watcher = RecommendedWatcher::new(
        move |res: Result<Event, notify::Error>| match res {
            Ok(event) => {
                for file_event in file_events(event) {
                    let _ = tx.send(file_event);
                }
            }
            Err(e) => {
                let _ = tx.send(FileEvent::WatcherError(e));
            }
        },
        Config::default().with_poll_interval(Duration::from_secs(1)),
    )?;

    let directories: HashSet<&Path> = session
        .watched_paths()
        .filter_map(|path| path.parent())
        .collect();
    for dir in directories {
        watcher
            .watch(dir, RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch {}", dir.display()))?;
        log::info!("Watching {}", dir.display());
    }

    Ok(watcher)
}
