//! Message-history endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use banter_core::{GroupMessage, PrivateMessage, RoomId};

use crate::server::GatewayState;

use super::ApiResult;

/// Maximum messages returnable per query
const MAX_LIMIT: usize = 200;

/// Default messages per query
const DEFAULT_LIMIT: usize = 50;

/// Query parameters for history endpoints
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

impl HistoryQuery {
    fn limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }
}

/// GET /history/rooms/{room}
pub async fn room_history(
    State(state): State<GatewayState>,
    Path(room): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> ApiResult<Json<Vec<GroupMessage>>> {
    let messages = state
        .history()
        .query_group(&RoomId::new(room), query.limit())
        .await?;

    Ok(Json(messages))
}

/// GET /history/direct/{user_a}/{user_b}
pub async fn direct_history(
    State(state): State<GatewayState>,
    Path((user_a, user_b)): Path<(String, String)>,
    Query(query): Query<HistoryQuery>,
) -> ApiResult<Json<Vec<PrivateMessage>>> {
    let messages = state
        .history()
        .query_private(&user_a, &user_b, query.limit())
        .await?;

    Ok(Json(messages))
}
