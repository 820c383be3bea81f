//! Delivery channel port - the transport-side fanout interface

use async_trait::async_trait;

use crate::events::OutboundEvent;
use crate::value_objects::{ConnectionId, RoomId};

/// Transport-side delivery of outbound events.
///
/// Assumed reliable and ordered per connection, at-most-once, no retry.
/// The channel also tracks transport-level room membership: the router
/// calls `join_room`/`leave_room` in lockstep with registry mutations so
/// that membership and presence state never diverge. Delivery to a closed
/// connection is a no-op.
#[async_trait]
pub trait DeliveryChannel: Send + Sync {
    /// Add a connection to a room's transport-level membership
    async fn join_room(&self, connection_id: ConnectionId, room: &RoomId);

    /// Remove a connection from a room's transport-level membership
    async fn leave_room(&self, connection_id: ConnectionId, room: &RoomId);

    /// Deliver an event to a single connection
    async fn send_to(&self, connection_id: ConnectionId, event: OutboundEvent);

    /// Deliver an event to every member of a room
    async fn broadcast_to_room(&self, room: &RoomId, event: OutboundEvent);

    /// Deliver an event to every member of a room except one connection
    async fn broadcast_to_room_except(
        &self,
        room: &RoomId,
        except: ConnectionId,
        event: OutboundEvent,
    );
}
