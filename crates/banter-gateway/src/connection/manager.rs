//! Connection manager
//!
//! Tracks all active WebSocket connections with DashMap and implements the
//! engine's `DeliveryChannel` contract over them. Room membership here is
//! purely a transport-level fanout index, kept in step by the router's
//! `join_room`/`leave_room` calls; the authoritative occupancy lives in the
//! session registry.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::mpsc;

use banter_core::{ConnectionId, DeliveryChannel, OutboundEvent, RoomId};

use super::Connection;

/// Manages all active WebSocket connections
pub struct ConnectionManager {
    /// Active connections by connection ID
    connections: DashMap<ConnectionId, Arc<Connection>>,

    /// Room name to connection IDs mapping, for broadcast fanout
    rooms: DashMap<RoomId, HashSet<ConnectionId>>,
}

impl ConnectionManager {
    /// Create a new connection manager
    #[must_use]
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
            rooms: DashMap::new(),
        }
    }

    /// Create a new connection manager wrapped in Arc
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Register a new connection
    pub fn add_connection(
        &self,
        connection_id: ConnectionId,
        sender: mpsc::Sender<OutboundEvent>,
    ) -> Arc<Connection> {
        let connection = Connection::new(connection_id, sender);
        self.connections.insert(connection_id, connection.clone());

        tracing::debug!(connection_id = %connection_id, "Connection added");

        connection
    }

    /// Remove a connection and drop it from every room index.
    ///
    /// Sweeps all room entries rather than trusting a caller-supplied room,
    /// so a connection can never linger in a fanout set after removal.
    pub fn remove_connection(&self, connection_id: ConnectionId) {
        if self.connections.remove(&connection_id).is_some() {
            for mut entry in self.rooms.iter_mut() {
                entry.value_mut().remove(&connection_id);
            }
            self.rooms.retain(|_, members| !members.is_empty());

            tracing::debug!(connection_id = %connection_id, "Connection removed");
        }
    }

    /// Get a connection by ID
    pub fn get_connection(&self, connection_id: ConnectionId) -> Option<Arc<Connection>> {
        self.connections.get(&connection_id).map(|r| r.clone())
    }

    /// Get all connections currently indexed under a room
    pub fn room_connections(&self, room: &RoomId) -> Vec<Arc<Connection>> {
        self.rooms
            .get(room)
            .map(|members| {
                members
                    .iter()
                    .filter_map(|id| self.connections.get(id).map(|c| c.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Get the total number of active connections
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Get the number of rooms with at least one connection
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Check if a connection exists
    pub fn has_connection(&self, connection_id: ConnectionId) -> bool {
        self.connections.contains_key(&connection_id)
    }
}

#[async_trait]
impl DeliveryChannel for ConnectionManager {
    async fn join_room(&self, connection_id: ConnectionId, room: &RoomId) {
        self.rooms
            .entry(room.clone())
            .or_default()
            .insert(connection_id);

        tracing::trace!(
            connection_id = %connection_id,
            room = %room,
            "Connection indexed into room"
        );
    }

    async fn leave_room(&self, connection_id: ConnectionId, room: &RoomId) {
        self.rooms.alter(room, |_, mut members| {
            members.remove(&connection_id);
            members
        });
        self.rooms.retain(|_, members| !members.is_empty());

        tracing::trace!(
            connection_id = %connection_id,
            room = %room,
            "Connection dropped from room"
        );
    }

    async fn send_to(&self, connection_id: ConnectionId, event: OutboundEvent) {
        if let Some(connection) = self.get_connection(connection_id) {
            if connection.send(event).await.is_err() {
                tracing::warn!(
                    connection_id = %connection_id,
                    "Failed to deliver event; socket task gone"
                );
            }
        }
    }

    async fn broadcast_to_room(&self, room: &RoomId, event: OutboundEvent) {
        let mut sent = 0;
        for connection in self.room_connections(room) {
            if connection.send(event.clone()).await.is_ok() {
                sent += 1;
            }
        }

        tracing::trace!(room = %room, sent = sent, event = %event, "Room broadcast");
    }

    async fn broadcast_to_room_except(
        &self,
        room: &RoomId,
        except: ConnectionId,
        event: OutboundEvent,
    ) {
        for connection in self.room_connections(room) {
            if connection.connection_id() == except {
                continue;
            }
            let _ = connection.send(event.clone()).await;
        }
    }
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ConnectionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionManager")
            .field("connections", &self.connections.len())
            .field("rooms", &self.rooms.len())
            .finish()
    }
}
