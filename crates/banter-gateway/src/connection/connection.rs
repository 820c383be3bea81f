//! Individual WebSocket connection
//!
//! A `Connection` is the write handle for one client: an mpsc sender
//! feeding that client's socket task. Identity and room state live in the
//! engine's session registry, not here.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc;

use banter_core::{ConnectionId, OutboundEvent};

/// A single live connection's outbound handle
pub struct Connection {
    /// Connection identifier, shared with the session registry
    connection_id: ConnectionId,

    /// Channel to the socket's send task
    sender: mpsc::Sender<OutboundEvent>,

    /// Connection creation time
    created_at: Instant,
}

impl Connection {
    /// Create a new connection handle
    pub fn new(connection_id: ConnectionId, sender: mpsc::Sender<OutboundEvent>) -> Arc<Self> {
        Arc::new(Self {
            connection_id,
            sender,
            created_at: Instant::now(),
        })
    }

    /// Get the connection identifier
    #[must_use]
    pub fn connection_id(&self) -> ConnectionId {
        self.connection_id
    }

    /// Get connection age
    #[must_use]
    pub fn age(&self) -> std::time::Duration {
        self.created_at.elapsed()
    }

    /// Send an event to this connection.
    ///
    /// # Errors
    /// Returns an error if the socket task has gone away.
    pub async fn send(
        &self,
        event: OutboundEvent,
    ) -> Result<(), mpsc::error::SendError<OutboundEvent>> {
        self.sender.send(event).await
    }

    /// Check if the socket task has gone away
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("connection_id", &self.connection_id)
            .field("created_at", &self.created_at)
            .finish()
    }
}
