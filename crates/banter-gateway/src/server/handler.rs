//! WebSocket handler
//!
//! Accepts upgrades, pumps frames between the socket and the engine, and
//! guarantees the disconnect event fires exactly once per connection.

use axum::{
    extract::{ws::Message, State, WebSocketUpgrade},
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;

use banter_core::{ConnectionId, OutboundEvent};
use banter_engine::ClientEvent;

use crate::protocol::ClientFrame;
use crate::server::GatewayState;

/// Channel buffer size for outgoing events
const EVENT_BUFFER_SIZE: usize = 100;

/// WebSocket upgrade handler
pub async fn ws_handler(
    State(state): State<GatewayState>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(state, socket))
}

/// Handle an upgraded WebSocket connection
async fn handle_socket(state: GatewayState, socket: axum::extract::ws::WebSocket) {
    let connection_id = ConnectionId::generate();

    let (tx, mut rx) = mpsc::channel::<OutboundEvent>(EVENT_BUFFER_SIZE);
    state.connection_manager().add_connection(connection_id, tx);

    tracing::info!(connection_id = %connection_id, "WebSocket connection established");

    let (mut ws_sink, mut ws_stream) = socket.split();

    // Greet the client with its connection ID before anything else.
    let connected = OutboundEvent::Connected { connection_id };
    if let Ok(json) = serde_json::to_string(&connected) {
        if ws_sink.send(Message::Text(json.into())).await.is_err() {
            tracing::warn!(connection_id = %connection_id, "Failed to send greeting");
            cleanup_connection(&state, connection_id).await;
            return;
        }
    }

    let state_recv = state.clone();

    // Receive frames from the socket and feed them to the router.
    let recv_task = tokio::spawn(async move {
        while let Some(msg) = ws_stream.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    handle_text_frame(&state_recv, connection_id, &text).await;
                }
                Ok(Message::Binary(_)) => {
                    tracing::debug!(
                        connection_id = %connection_id,
                        "Binary frames not supported; dropped"
                    );
                }
                Ok(Message::Ping(_) | Message::Pong(_)) => {
                    // Ping/pong handled by axum
                }
                Ok(Message::Close(_)) => {
                    tracing::info!(connection_id = %connection_id, "Client closed connection");
                    return;
                }
                Err(e) => {
                    tracing::warn!(
                        connection_id = %connection_id,
                        error = %e,
                        "WebSocket error"
                    );
                    return;
                }
            }
        }
    });

    // Drain the outbound channel into the socket.
    let send_task = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            match serde_json::to_string(&event) {
                Ok(json) => {
                    if ws_sink.send(Message::Text(json.into())).await.is_err() {
                        tracing::warn!(
                            connection_id = %connection_id,
                            "Failed to write to WebSocket"
                        );
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!(
                        connection_id = %connection_id,
                        error = %e,
                        "Failed to serialize outbound event"
                    );
                }
            }
        }

        let _ = ws_sink.close().await;
    });

    // Either side ending tears the connection down.
    tokio::select! {
        _ = recv_task => {
            tracing::debug!(connection_id = %connection_id, "Receive task ended");
        }
        _ = send_task => {
            tracing::debug!(connection_id = %connection_id, "Send task ended");
        }
    }

    cleanup_connection(&state, connection_id).await;
}

/// Decode one text frame and route it.
///
/// A frame that fails to decode, or an event the router ignores, produces
/// no response to the client. Only store failures surface in the logs at
/// error level.
async fn handle_text_frame(state: &GatewayState, connection_id: ConnectionId, text: &str) {
    let frame = match ClientFrame::from_json(text) {
        Ok(frame) => frame,
        Err(e) => {
            tracing::debug!(
                connection_id = %connection_id,
                error = %e,
                "Undecodable frame dropped"
            );
            return;
        }
    };

    if let Err(e) = state.router().handle(connection_id, frame.into()).await {
        tracing::error!(
            connection_id = %connection_id,
            error = %e,
            "Event handling failed"
        );
    }
}

/// Tear down a connection: route the disconnect, then drop the transport
/// handle
async fn cleanup_connection(state: &GatewayState, connection_id: ConnectionId) {
    tracing::info!(connection_id = %connection_id, "Cleaning up connection");

    if let Err(e) = state
        .router()
        .handle(connection_id, ClientEvent::Disconnect)
        .await
    {
        tracing::error!(
            connection_id = %connection_id,
            error = %e,
            "Disconnect handling failed"
        );
    }

    state.connection_manager().remove_connection(connection_id);
}
