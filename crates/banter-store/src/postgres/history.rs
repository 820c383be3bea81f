//! PostgreSQL implementation of `HistoryStore`

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::instrument;

use banter_core::{
    GroupMessage, HistoryStore, NewGroupMessage, NewPrivateMessage, PrivateMessage, RoomId,
    StoreResult,
};

use super::error::map_db_error;
use super::models::{GroupMessageModel, PrivateMessageModel};

/// PostgreSQL-backed message history
#[derive(Clone)]
pub struct PgHistory {
    pool: PgPool,
}

impl PgHistory {
    /// Create a new history store on the given pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HistoryStore for PgHistory {
    #[instrument(skip(self, draft))]
    async fn append_group(&self, draft: NewGroupMessage) -> StoreResult<GroupMessage> {
        let stored = draft.stored_at(Utc::now());

        sqlx::query(
            r#"
            INSERT INTO group_messages (from_user, room, message, sent_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&stored.from_user)
        .bind(stored.room.as_str())
        .bind(&stored.message)
        .bind(stored.sent_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(stored)
    }

    #[instrument(skip(self, draft))]
    async fn append_private(&self, draft: NewPrivateMessage) -> StoreResult<PrivateMessage> {
        let stored = draft.stored_at(Utc::now());

        sqlx::query(
            r#"
            INSERT INTO private_messages (from_user, to_user, message, sent_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&stored.from_user)
        .bind(&stored.to_user)
        .bind(&stored.message)
        .bind(stored.sent_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(stored)
    }

    #[instrument(skip(self))]
    async fn query_group(&self, room: &RoomId, limit: usize) -> StoreResult<Vec<GroupMessage>> {
        // Most recent `limit` rows, returned in chronological order.
        let mut rows = sqlx::query_as::<_, GroupMessageModel>(
            r#"
            SELECT from_user, room, message, sent_at
            FROM group_messages
            WHERE room = $1
            ORDER BY sent_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(room.as_str())
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.reverse();
        Ok(rows.into_iter().map(GroupMessage::from).collect())
    }

    #[instrument(skip(self))]
    async fn query_private(
        &self,
        user_a: &str,
        user_b: &str,
        limit: usize,
    ) -> StoreResult<Vec<PrivateMessage>> {
        let mut rows = sqlx::query_as::<_, PrivateMessageModel>(
            r#"
            SELECT from_user, to_user, message, sent_at
            FROM private_messages
            WHERE (from_user = $1 AND to_user = $2)
               OR (from_user = $2 AND to_user = $1)
            ORDER BY sent_at DESC, id DESC
            LIMIT $3
            "#,
        )
        .bind(user_a)
        .bind(user_b)
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.reverse();
        Ok(rows.into_iter().map(PrivateMessage::from).collect())
    }
}
