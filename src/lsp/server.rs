use anyhow::Result;
use tokio::io::{stdin, stdout};
use tokio::sync::mpsc;
use tower_lsp::lsp_types::MessageType;
use tower_lsp::lsp_types::notification::Notification;
use tower_lsp::{Client, LspService, Server};

use crate::host::{HostEvent, StatusSnapshot, WorkspaceHost};
use crate::lsp::backend::Backend;

/// `wordCount/status`: a status item changed
#[derive(Debug)]
pub enum StatusNotification {}

impl Notification for StatusNotification {
    type Params = StatusSnapshot;
    const METHOD: &'static str = "wordCount/status";
}

/// Start the LSP server on stdio
pub async fn serve() -> Result<()> {
    let (service, socket) = LspService::build(|client| {
        let (host, events) = WorkspaceHost::channel();
        tokio::spawn(forward_host_events(client.clone(), events));
        Backend::new(client, host)
    })
    .finish();

    log::info!("Serving LSP on stdio");
    Server::new(stdin(), stdout(), socket).serve(service).await;

    Ok(())
}

/// Relay host output to the client in the order it was produced
async fn forward_host_events(client: Client, mut events: mpsc::UnboundedReceiver<HostEvent>) {
    while let Some(event) = events.recv().await {
        match event {
            HostEvent::Status(snapshot) => {
                client
                    .send_notification::<StatusNotification>(snapshot)
                    .await;
            }
            HostEvent::Message(message) => {
                client.show_message(MessageType::INFO, message).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::StatusAlignment;

    #[test]
    fn test_status_params_wire_format() {
        let params = StatusSnapshot {
            id: 1,
            alignment: StatusAlignment::Left,
            visible: true,
            text: "2 Words".to_string(),
        };

        let value = serde_json::to_value(&params).expect("serialize");
        assert_eq!(
            value,
            serde_json::json!({
                "id": 1,
                "alignment": "left",
                "visible": true,
                "text": "2 Words"
            })
        );
    }
}
