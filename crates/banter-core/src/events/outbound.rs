//! Outbound notifications produced by the router
//!
//! Every server-to-client notification is one of these events. The wire
//! form is a tagged JSON object: `{"event": "...", "data": {...}}`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::entities::{GroupMessage, PrivateMessage};
use crate::value_objects::{ConnectionId, RoomId};

/// What happened to a room member, carried by a system notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeAction {
    Joined,
    Left,
    Disconnected,
}

impl NoticeAction {
    /// Get the string representation of the action
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Joined => "joined",
            Self::Left => "left",
            Self::Disconnected => "disconnected",
        }
    }
}

impl fmt::Display for NoticeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A notification produced by the router for delivery to one or more
/// connections
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum OutboundEvent {
    /// Transport-level greeting sent once per accepted connection
    Connected { connection_id: ConnectionId },

    /// A persisted group message, broadcast to every occupant of the room
    /// (sender included)
    RoomMessage(GroupMessage),

    /// Updated occupant list for a room after a membership change
    UpdateUsers { room: RoomId, occupants: Vec<String> },

    /// A persisted private message, delivered to the recipient and echoed
    /// to the sender
    PrivateMessage(PrivateMessage),

    /// Someone started typing
    Typing { from_user: String },

    /// Someone stopped typing
    StopTyping { from_user: String },

    /// Membership change notice for a room
    SystemNotice {
        room: RoomId,
        user: String,
        action: NoticeAction,
    },
}

impl OutboundEvent {
    /// Get the wire tag for this event
    #[must_use]
    pub const fn event_name(&self) -> &'static str {
        match self {
            Self::Connected { .. } => "connected",
            Self::RoomMessage(_) => "room_message",
            Self::UpdateUsers { .. } => "update_users",
            Self::PrivateMessage(_) => "private_message",
            Self::Typing { .. } => "typing",
            Self::StopTyping { .. } => "stop_typing",
            Self::SystemNotice { .. } => "system_notice",
        }
    }
}

impl fmt::Display for OutboundEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.event_name())
    }
}
