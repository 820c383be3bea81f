//! Database models with SQLx `FromRow` derives

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use banter_core::{GroupMessage, PrivateMessage, RoomId};

/// Row model for the group_messages table
#[derive(Debug, Clone, FromRow)]
pub struct GroupMessageModel {
    pub from_user: String,
    pub room: String,
    pub message: String,
    pub sent_at: DateTime<Utc>,
}

impl From<GroupMessageModel> for GroupMessage {
    fn from(model: GroupMessageModel) -> Self {
        Self {
            from_user: model.from_user,
            room: RoomId::new(model.room),
            message: model.message,
            sent_at: model.sent_at,
        }
    }
}

/// Row model for the private_messages table
#[derive(Debug, Clone, FromRow)]
pub struct PrivateMessageModel {
    pub from_user: String,
    pub to_user: String,
    pub message: String,
    pub sent_at: DateTime<Utc>,
}

impl From<PrivateMessageModel> for PrivateMessage {
    fn from(model: PrivateMessageModel) -> Self {
        Self {
            from_user: model.from_user,
            to_user: model.to_user,
            message: model.message,
            sent_at: model.sent_at,
        }
    }
}

/// Row model for the accounts table
#[derive(Debug, Clone, FromRow)]
pub struct AccountModel {
    pub username: String,
    pub password_hash: String,
}
