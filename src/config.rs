//! Configuration management for the word count server.
//!
//! Handles:
//! - Command-line argument parsing
//! - Choosing between the LSP and terminal front ends

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments for the word count server
#[derive(Debug, Parser)]
#[command(name = "wordcount-ls")]
#[command(about = "Live word count for markdown documents")]
#[command(version)]
pub struct Args {
    /// Log level for the server
    #[arg(
        long,
        default_value = "info",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Watch files on disk and print the word count indicator
    Watch {
        /// Files to load; the first one starts out active
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Print the initial indicator and exit
        #[arg(long)]
        once: bool,
    },
}

/// Which front end drives the extension
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Language server over stdio
    Lsp,
    /// Terminal watcher over the given files
    Watch { files: Vec<PathBuf>, once: bool },
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    /// Default log filter, overridden by `RUST_LOG`
    pub log_level: String,
    pub mode: Mode,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self> {
        let log_level = args.log_level.to_ascii_lowercase();
        if !matches!(
            log_level.as_str(),
            "trace" | "debug" | "info" | "warn" | "error" | "off"
        ) {
            bail!("unknown log level '{}'", args.log_level);
        }

        let mode = match args.command {
            None => Mode::Lsp,
            Some(Command::Watch { files, once }) => Mode::Watch { files, once },
        };

        Ok(Config { log_level, mode })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            mode: Mode::Lsp,
        }
    }
}
