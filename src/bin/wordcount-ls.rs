use anyhow::Result;
use markdown_word_count::config::{Config, Mode};
use markdown_word_count::{lsp, terminal};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse configuration from command line and environment
    let config = Config::from_args_and_env()?;

    // Logs go to stderr; stdout belongs to the protocol or the indicator
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.as_str()),
    )
    .init();

    match config.mode {
        Mode::Lsp => lsp::serve().await,
        Mode::Watch { files, once } => terminal::watch(&files, once).await,
    }
}
