use anyhow::{Context, bail};
use serde_json::Value;
use tower_lsp::jsonrpc::{Error as LspError, Result as LspResult};
use tower_lsp::lsp_types::*;

use crate::core::{Position, Selection, TextDocument};
use crate::lsp::backend::Backend;

/// Client-sent command reporting a cursor move: arguments `[uri, range]`
pub const DID_CHANGE_SELECTION: &str = "wordCount.didChangeSelection";

/// Trait for keeping the host's documents in sync with the client
#[tower_lsp::async_trait]
pub trait HandleTextSync {
    async fn handle_did_open(&self, params: DidOpenTextDocumentParams);
    async fn handle_did_change(&self, params: DidChangeTextDocumentParams);
    async fn handle_did_close(&self, params: DidCloseTextDocumentParams);
}

/// Trait for handling workspace/executeCommand
#[tower_lsp::async_trait]
pub trait HandleExecuteCommand {
    async fn handle_execute_command(&self, params: ExecuteCommandParams)
    -> LspResult<Option<Value>>;
}

#[tower_lsp::async_trait]
impl HandleTextSync for Backend {
    async fn handle_did_open(&self, params: DidOpenTextDocumentParams) {
        let item = params.text_document;
        self.host.open_document(TextDocument::new(
            item.uri.to_string(),
            item.language_id,
            item.text,
        ));
    }

    async fn handle_did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        // Full sync: the last change carries the whole text
        if let Some(change) = params.content_changes.into_iter().last() {
            if !self.host.change_document(uri.as_str(), change.text) {
                log::warn!("Change for unopened document {}", uri);
            }
        }
    }

    async fn handle_did_close(&self, params: DidCloseTextDocumentParams) {
        self.host.close_document(params.text_document.uri.as_str());
    }
}

#[tower_lsp::async_trait]
impl HandleExecuteCommand for Backend {
    async fn handle_execute_command(
        &self,
        params: ExecuteCommandParams,
    ) -> LspResult<Option<Value>> {
        if params.command == DID_CHANGE_SELECTION {
            let (uri, range) = parse_selection_arguments(&params.arguments)
                .map_err(|e| LspError::invalid_params(format!("{:#}", e)))?;
            if !self.host.change_selection(uri.as_str(), to_selection(range)) {
                return Err(LspError::invalid_params(format!(
                    "document {} is not open",
                    uri
                )));
            }
            return Ok(None);
        }

        self.commands
            .execute(&params.command)
            .map_err(|e| LspError::invalid_params(e.to_string()))?;
        Ok(None)
    }
}

/// Convert an LSP range into a selection anchored at its start
pub fn to_selection(range: Range) -> Selection {
    Selection::new(
        Position::new(range.start.line, range.start.character),
        Position::new(range.end.line, range.end.character),
    )
}

fn parse_selection_arguments(arguments: &[Value]) -> anyhow::Result<(Url, Range)> {
    let [uri, range] = arguments else {
        bail!("expected [uri, range], got {} arguments", arguments.len());
    };
    let uri: Url = serde_json::from_value(uri.clone()).context("invalid document uri")?;
    let range: Range = serde_json::from_value(range.clone()).context("invalid selection range")?;
    Ok((uri, range))
}
