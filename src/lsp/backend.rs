use std::sync::Arc;

use tokio::sync::Mutex;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

use crate::commands::CommandRegistry;
use crate::extension::{self, Extension};
use crate::host::{Host, WorkspaceHost};
use crate::lsp::handlers::{DID_CHANGE_SELECTION, HandleExecuteCommand, HandleTextSync};

/// The main LSP backend: the editor client acts as the extension host
pub struct Backend {
    pub client: Client,
    pub host: Arc<WorkspaceHost>,
    pub commands: CommandRegistry,
    pub extension: Mutex<Option<Extension>>,
}

impl Backend {
    pub fn new(client: Client, host: WorkspaceHost) -> Self {
        Self {
            client,
            host: Arc::new(host),
            commands: CommandRegistry::new(),
            extension: Mutex::new(None),
        }
    }

    /// Command identifiers advertised to the client
    pub fn advertised_commands() -> Vec<String> {
        extension::COMMANDS
            .iter()
            .chain(std::iter::once(&DID_CHANGE_SELECTION))
            .map(|id| id.to_string())
            .collect()
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(
        &self,
        _: InitializeParams,
    ) -> tower_lsp::jsonrpc::Result<InitializeResult> {
        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                execute_command_provider: Some(ExecuteCommandOptions {
                    commands: Self::advertised_commands(),
                    work_done_progress_options: Default::default(),
                }),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "wordcount-ls".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
            ..Default::default()
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        let host: Arc<dyn Host> = self.host.clone();
        match extension::activate(host, &self.commands) {
            Ok(activated) => {
                *self.extension.lock().await = Some(activated);
                self.client
                    .log_message(MessageType::INFO, "wordcount-ls initialized")
                    .await;
            }
            Err(e) => {
                log::error!("Failed to activate extension: {:#}", e);
                self.client
                    .log_message(
                        MessageType::ERROR,
                        format!("Failed to activate extension: {}", e),
                    )
                    .await;
            }
        }
    }

    async fn shutdown(&self) -> tower_lsp::jsonrpc::Result<()> {
        if let Some(mut extension) = self.extension.lock().await.take() {
            extension.deactivate();
        }
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        self.handle_did_open(params).await
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        self.handle_did_change(params).await
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        self.handle_did_close(params).await
    }

    async fn execute_command(
        &self,
        params: ExecuteCommandParams,
    ) -> tower_lsp::jsonrpc::Result<Option<serde_json::Value>> {
        self.handle_execute_command(params).await
    }
}
