//! WebSocket Event Broadcasting
//!
//! This module is the subscription boundary: observers connect here, receive
//! one `connected` event carrying a full document snapshot, and are then fed
//! incremental change events in commit order.
//!
//! ## Architecture
//!
//! - Uses the store's tokio broadcast channel for event distribution
//! - `StatusStore::subscribe` pairs the snapshot with the receiver
//!   atomically, so a late joiner converges with no gap
//! - Each connection is an independent task; one failing or slow observer
//!   never affects the others or the mutation path
//! - JSON-serialized events using the StateEvent enum

use crate::state::AppState;
use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use beacon_core::StateEvent;
use beacon_storage::StatusStore;
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

/// WebSocket upgrade handler for `GET /ws`.
///
/// ## Protocol
///
/// 1. Connection upgraded to WebSocket
/// 2. Server sends a `connected` event with the full document snapshot
/// 3. Server streams incremental change events, FIFO per connection
/// 4. Client frames are ignored - the channel is pure push
/// 5. On send failure or client close, the connection is dropped; the
///    subscription is removed implicitly with it
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state.store))
}

/// Handle an individual observer connection for its lifetime.
async fn handle_socket(socket: WebSocket, store: Arc<StatusStore>) {
    info!("Observer connected");

    let (mut sender, mut receiver) = socket.split();

    // Snapshot and receiver are taken atomically: the snapshot reflects every
    // committed mutation and the receiver holds only events committed after
    // it, so the snapshot always goes out first.
    let (snapshot, mut rx) = store.subscribe().await;

    if let Err(e) = send_event(&mut sender, StateEvent::Connected { data: snapshot }).await {
        error!(error = %e, "Failed to send connected snapshot");
        return;
    }

    // Drain inbound frames so close/ping handling works; payloads are ignored.
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Close(_)) => {
                    debug!("Observer sent close frame");
                    break;
                }
                Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => {
                    // Pong is handled by axum automatically.
                }
                Ok(Message::Text(text)) => {
                    debug!(text = %text, "Ignoring observer text frame");
                }
                Ok(Message::Binary(data)) => {
                    debug!(len = data.len(), "Ignoring observer binary frame");
                }
                Err(e) => {
                    warn!(error = %e, "WebSocket receive error");
                    break;
                }
            }
        }
    });

    // Main loop: forward events to the observer in publish order.
    loop {
        tokio::select! {
            result = rx.recv() => {
                match result {
                    Ok(event) => {
                        if let Err(e) = send_event(&mut sender, event).await {
                            debug!(error = %e, "Observer unreachable, closing connection");
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        // The observer fell behind the channel buffer. Its
                        // stream now has a gap, so disconnect it; on
                        // reconnect it converges via a fresh snapshot.
                        warn!(skipped, "Observer lagged, disconnecting");
                        break;
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        info!("Broadcast channel closed");
                        break;
                    }
                }
            }

            // Observer hung up.
            _ = &mut recv_task => {
                debug!("Observer receive task finished");
                break;
            }
        }
    }

    recv_task.abort();
    info!("Observer disconnected");
}

/// Serialize an event to JSON and send it as a text frame.
async fn send_event(
    sender: &mut futures_util::stream::SplitSink<WebSocket, Message>,
    event: StateEvent,
) -> Result<(), axum::Error> {
    let json = serde_json::to_string(&event).map_err(|e| {
        error!(error = %e, "Failed to serialize event");
        axum::Error::new(e)
    })?;

    sender.send(Message::Text(json.into())).await
}
