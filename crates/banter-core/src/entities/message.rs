//! Message entities - persisted group and private messages
//!
//! Stored messages are immutable once written; `sent_at` is assigned by the
//! history store at append time so that a history query and the live
//! broadcast agree on the timestamp.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::RoomId;

/// Draft of a group message, before the store assigns `sent_at`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGroupMessage {
    pub from_user: String,
    pub room: RoomId,
    pub message: String,
}

impl NewGroupMessage {
    /// Create a group message draft
    pub fn new(
        from_user: impl Into<String>,
        room: RoomId,
        message: impl Into<String>,
    ) -> Self {
        Self {
            from_user: from_user.into(),
            room,
            message: message.into(),
        }
    }

    /// Attach the store-assigned timestamp
    #[must_use]
    pub fn stored_at(self, sent_at: DateTime<Utc>) -> GroupMessage {
        GroupMessage {
            from_user: self.from_user,
            room: self.room,
            message: self.message,
            sent_at,
        }
    }
}

/// Persisted group message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMessage {
    pub from_user: String,
    pub room: RoomId,
    pub message: String,
    pub sent_at: DateTime<Utc>,
}

/// Draft of a private message, before the store assigns `sent_at`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPrivateMessage {
    pub from_user: String,
    pub to_user: String,
    pub message: String,
}

impl NewPrivateMessage {
    /// Create a private message draft
    pub fn new(
        from_user: impl Into<String>,
        to_user: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            from_user: from_user.into(),
            to_user: to_user.into(),
            message: message.into(),
        }
    }

    /// Attach the store-assigned timestamp
    #[must_use]
    pub fn stored_at(self, sent_at: DateTime<Utc>) -> PrivateMessage {
        PrivateMessage {
            from_user: self.from_user,
            to_user: self.to_user,
            message: self.message,
            sent_at,
        }
    }
}

/// Persisted private message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateMessage {
    pub from_user: String,
    pub to_user: String,
    pub message: String,
    pub sent_at: DateTime<Utc>,
}

impl PrivateMessage {
    /// Check whether the given pair of users are the participants,
    /// regardless of direction
    pub fn between(&self, user_a: &str, user_b: &str) -> bool {
        (self.from_user == user_a && self.to_user == user_b)
            || (self.from_user == user_b && self.to_user == user_a)
    }
}
