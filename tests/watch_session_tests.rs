//! Integration tests for the terminal front end, without a live file watcher
use std::fs;
use std::path::PathBuf;

use markdown_word_count::extension::{COUNT_SELECTION, SAY_HELLO};
use markdown_word_count::terminal::{FileEvent, WatchSession};
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("write file");
    path.canonicalize().expect("canonical path")
}

#[test]
fn test_first_file_starts_active() {
    let dir = TempDir::new().expect("temp dir");
    let readme = write(&dir, "README.md", "one two three");
    let notes = write(&dir, "notes.txt", "plain words");

    let session = WatchSession::open(&[readme.clone(), notes]).expect("open session");
    assert_eq!(session.active_path(), Some(readme));
    assert_eq!(session.status_line(), "3 Words");

    session.close();
}

#[test]
fn test_plaintext_first_is_hidden() {
    let dir = TempDir::new().expect("temp dir");
    let notes = write(&dir, "notes.txt", "plain words");

    let session = WatchSession::open(&[notes]).expect("open session");
    assert_eq!(session.status_line(), "(hidden)");

    session.close();
}

#[test]
fn test_modification_updates_indicator() {
    let dir = TempDir::new().expect("temp dir");
    let readme = write(&dir, "README.md", "one");
    let mut session = WatchSession::open(&[readme.clone()]).expect("open session");
    assert_eq!(session.status_line(), "1 Word");

    fs::write(&readme, "one two").expect("rewrite");
    session.apply(FileEvent::Changed(readme.clone()));

    assert_eq!(session.drain_output(), vec!["2 Words".to_string()]);
    assert_eq!(session.status_line(), "2 Words");

    session.close();
}

#[test]
fn test_changed_background_file_becomes_active() {
    let dir = TempDir::new().expect("temp dir");
    let readme = write(&dir, "README.md", "one");
    let notes = write(&dir, "notes.txt", "plain words");
    let mut session = WatchSession::open(&[readme, notes.clone()]).expect("open session");

    session.apply(FileEvent::Changed(notes.clone()));
    assert_eq!(session.active_path(), Some(notes));
    assert_eq!(session.drain_output(), vec!["(hidden)".to_string()]);

    session.close();
}

#[test]
fn test_removed_active_file_hides_indicator() {
    let dir = TempDir::new().expect("temp dir");
    let readme = write(&dir, "README.md", "one two");
    let mut session = WatchSession::open(&[readme.clone()]).expect("open session");

    fs::remove_file(&readme).expect("remove");
    session.apply(FileEvent::Removed(readme));

    assert_eq!(session.active_path(), None);
    assert_eq!(session.drain_output(), vec!["(hidden)".to_string()]);

    session.close();
}

#[test]
fn test_file_moved_away_hides_indicator() {
    let dir = TempDir::new().expect("temp dir");
    let readme = write(&dir, "README.md", "one two");
    let mut session = WatchSession::open(&[readme.clone()]).expect("open session");

    fs::rename(&readme, dir.path().join("old.md")).expect("rename");
    // Some backends only report a modification of the old path
    session.apply(FileEvent::Changed(readme));

    assert_eq!(session.active_path(), None);
    assert_eq!(session.status_line(), "(hidden)");
    assert_eq!(session.drain_output(), vec!["(hidden)".to_string()]);

    session.close();
}

#[test]
fn test_file_moved_back_is_counted_again() {
    let dir = TempDir::new().expect("temp dir");
    let readme = write(&dir, "README.md", "one two");
    let mut session = WatchSession::open(&[readme.clone()]).expect("open session");

    let old = dir.path().join("old.md");
    fs::rename(&readme, &old).expect("rename away");
    session.apply(FileEvent::Removed(readme.clone()));
    fs::rename(&old, &readme).expect("rename back");
    session.apply(FileEvent::Changed(readme.clone()));

    assert_eq!(session.active_path(), Some(readme));
    assert_eq!(
        session.drain_output(),
        vec!["(hidden)".to_string(), "2 Words".to_string()]
    );

    session.close();
}

#[test]
fn test_unrelated_paths_are_ignored() {
    let dir = TempDir::new().expect("temp dir");
    let readme = write(&dir, "README.md", "one two");
    let other = write(&dir, "other.md", "a b c d");
    let mut session = WatchSession::open(&[readme]).expect("open session");

    session.apply(FileEvent::Changed(other));
    assert!(session.drain_output().is_empty());
    assert_eq!(session.status_line(), "2 Words");

    session.close();
}

#[test]
fn test_commands_print_messages() {
    let dir = TempDir::new().expect("temp dir");
    let readme = write(&dir, "README.md", "one two");
    let mut session = WatchSession::open(&[readme]).expect("open session");

    session.execute_command(SAY_HELLO).expect("say hello");
    // A freshly opened file has an empty selection
    session.execute_command(COUNT_SELECTION).expect("count selection");

    assert_eq!(
        session.drain_output(),
        vec![
            "info: Hello World!".to_string(),
            "info: Selected characters: 0".to_string()
        ]
    );

    session.close();
}

#[test]
fn test_missing_file_fails_to_open() {
    let dir = TempDir::new().expect("temp dir");
    let missing = dir.path().join("missing.md");
    assert!(WatchSession::open(&[missing]).is_err());
}
