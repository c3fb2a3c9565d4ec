//! WebSocket change feed
//!
//! Replaces the per-page realtime subscriptions of the old dashboard: one
//! socket per client, over which the server pushes coalesced change hints
//! (`{"type":"changed","table":"orders"}`). Clients respond by re-fetching
//! the affected page data; no row payloads travel over the socket.

use crate::state::AppState;
use axum::{
    extract::{
        State, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use swyft_database::ChangeTable;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};

/// Messages pushed to dashboard clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WsMessage {
    /// A watched table changed; re-fetch whatever depends on it
    #[serde(rename = "changed")]
    Changed {
        /// Table that changed
        table: ChangeTable,
    },
}

/// Upgrade handler for the change feed socket
pub async fn ws_handler(
    State(state): State<Arc<AppState>>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Pump coalesced change events into the socket until either side closes
async fn handle_socket(mut socket: WebSocket, state: Arc<AppState>) {
    let mut changes = state.subscribe_changes();
    debug!("Change feed client connected");

    loop {
        tokio::select! {
            event = changes.recv() => match event {
                Ok(event) => {
                    let message = WsMessage::Changed { table: event.table };
                    let Ok(text) = serde_json::to_string(&message) else {
                        continue;
                    };
                    if socket.send(Message::Text(text)).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    // Dropped hints are harmless; the next one triggers the
                    // same re-fetch.
                    warn!("Change feed client lagged, skipped {} events", skipped);
                }
                Err(RecvError::Closed) => break,
            },
            incoming = socket.recv() => match incoming {
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => {} // ignore pings and client chatter
            },
        }
    }

    debug!("Change feed client disconnected");
}
