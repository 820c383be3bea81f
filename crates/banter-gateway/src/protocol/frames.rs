//! Client frame format
//!
//! Client-to-server frames are tagged JSON objects mirroring the outbound
//! event shape: `{"event": "...", "data": {...}}`. Server-to-client frames
//! are `OutboundEvent` values serialized directly.

use serde::{Deserialize, Serialize};

use banter_core::RoomId;
use banter_engine::ClientEvent;

/// A decoded client-to-server frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientFrame {
    /// Claim a display name
    Register { display_name: String },
    /// Join a room
    JoinRoom { room: String },
    /// Leave the current room
    LeaveRoom,
    /// Send a message to the current room
    GroupMessage { message: String },
    /// Send a direct message
    PrivateMessage { to_user: String, message: String },
    /// Typing indicator
    Typing {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        to_user: Option<String>,
    },
    /// End-of-typing indicator
    StopTyping {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        to_user: Option<String>,
    },
}

impl ClientFrame {
    /// Decode a frame from its JSON text
    ///
    /// # Errors
    /// Returns an error if the text is not a valid frame
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Encode a frame to JSON text
    ///
    /// # Errors
    /// Returns an error if serialization fails
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl From<ClientFrame> for ClientEvent {
    fn from(frame: ClientFrame) -> Self {
        match frame {
            ClientFrame::Register { display_name } => Self::Register { display_name },
            ClientFrame::JoinRoom { room } => Self::Join {
                room: RoomId::new(room),
            },
            ClientFrame::LeaveRoom => Self::Leave,
            ClientFrame::GroupMessage { message } => Self::GroupMessage { message },
            ClientFrame::PrivateMessage { to_user, message } => {
                Self::PrivateMessage { to_user, message }
            }
            ClientFrame::Typing { to_user } => Self::Typing { to_user },
            ClientFrame::StopTyping { to_user } => Self::StopTyping { to_user },
        }
    }
}
