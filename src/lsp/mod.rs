//! LSP Protocol Implementation
//!
//! Runs the extension with an LSP client as its host.

pub mod backend;
pub mod handlers;
pub mod server;

pub use backend::Backend;
pub use server::{StatusNotification, serve};
