use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use moodnest_persist::{ConversationTurn, SentimentSample};
use super::UserQuery;
use crate::{error::ApiResult, state::AppState};

/// Turns shown in the chat history view
pub const HISTORY_LIMIT: usize = 50;
/// Turns included in a data export
pub const EXPORT_LIMIT: usize = 1000;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TurnView {
    pub id: String,
    pub user_id: i64,
    /// "user" or "assistant"
    pub role: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl From<ConversationTurn> for TurnView {
    fn from(turn: ConversationTurn) -> Self {
        Self {
            id: turn.id,
            user_id: turn.user_id.0,
            role: turn.role.as_str().to_string(),
            content: turn.content,
            timestamp: turn.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SentimentLogView {
    pub id: String,
    pub user_id: i64,
    pub score: f64,
    pub magnitude: f64,
    pub timestamp: DateTime<Utc>,
}

impl From<SentimentSample> for SentimentLogView {
    fn from(sample: SentimentSample) -> Self {
        Self {
            id: sample.id,
            user_id: sample.user_id.0,
            score: sample.score,
            magnitude: sample.magnitude,
            timestamp: sample.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ExportResponse {
    pub user_id: i64,
    pub exported_at: DateTime<Utc>,
    pub chats: Vec<TurnView>,
    pub sentiment_logs: Vec<SentimentLogView>,
}

/// Recent conversation turns, oldest first
#[utoipa::path(
    get,
    path = "/api/history",
    params(UserQuery),
    responses(
        (status = 200, description = "Last 50 turns", body = [TurnView])
    ),
    tag = "history"
)]
pub async fn get_history(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UserQuery>,
) -> ApiResult<Json<Vec<TurnView>>> {
    let turns = state
        .store
        .fetch_recent_turns(query.user_id(), HISTORY_LIMIT)
        .await?;

    Ok(Json(turns.into_iter().map(TurnView::from).collect()))
}

/// Every sentiment sample for a user, oldest first
#[utoipa::path(
    get,
    path = "/api/analytics",
    params(UserQuery),
    responses(
        (status = 200, description = "Sentiment samples", body = [SentimentLogView])
    ),
    tag = "history"
)]
pub async fn get_analytics(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UserQuery>,
) -> ApiResult<Json<Vec<SentimentLogView>>> {
    let samples = state.store.sentiment_history(query.user_id()).await?;

    Ok(Json(samples.into_iter().map(SentimentLogView::from).collect()))
}

/// Export conversation and sentiment logs
#[utoipa::path(
    get,
    path = "/api/export",
    params(UserQuery),
    responses(
        (status = 200, description = "Exported data", body = ExportResponse)
    ),
    tag = "history"
)]
pub async fn export_data(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UserQuery>,
) -> ApiResult<Json<ExportResponse>> {
    let user_id = query.user_id();
    let chats = state.store.fetch_recent_turns(user_id, EXPORT_LIMIT).await?;
    let sentiment_logs = state.store.sentiment_history(user_id).await?;

    tracing::info!(user_id = %user_id, chats = chats.len(), "Exporting user data");

    Ok(Json(ExportResponse {
        user_id: user_id.0,
        exported_at: Utc::now(),
        chats: chats.into_iter().map(TurnView::from).collect(),
        sentiment_logs: sentiment_logs.into_iter().map(SentimentLogView::from).collect(),
    }))
}
