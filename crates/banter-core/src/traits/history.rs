//! History store port - durable log of group and private messages

use async_trait::async_trait;

use crate::entities::{GroupMessage, NewGroupMessage, NewPrivateMessage, PrivateMessage};
use crate::error::DomainError;
use crate::value_objects::RoomId;

/// Result type for history store operations
pub type StoreResult<T> = Result<T, DomainError>;

/// Durable, append-only log of group and private messages.
///
/// Appends assign `sent_at` and return the stored record; the router
/// broadcasts that record (not the draft) so live delivery and later
/// history queries carry the same timestamp. Queries return records
/// ordered by `sent_at` ascending, and the private query is symmetric in
/// its user pair.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Persist a group message, assigning its timestamp
    async fn append_group(&self, draft: NewGroupMessage) -> StoreResult<GroupMessage>;

    /// Persist a private message, assigning its timestamp
    async fn append_private(&self, draft: NewPrivateMessage) -> StoreResult<PrivateMessage>;

    /// Fetch up to `limit` group messages for a room, oldest first
    async fn query_group(&self, room: &RoomId, limit: usize) -> StoreResult<Vec<GroupMessage>>;

    /// Fetch up to `limit` private messages between two users, oldest
    /// first; the result is the same whichever way the pair is given
    async fn query_private(
        &self,
        user_a: &str,
        user_b: &str,
        limit: usize,
    ) -> StoreResult<Vec<PrivateMessage>>;
}
