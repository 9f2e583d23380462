use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use moodnest_persist::UserId;
use moodnest_pipeline::{PipelineError, PipelineResult};
use crate::{error::ApiResult, state::AppState};

#[derive(Debug, Deserialize, ToSchema)]
pub struct ChatRequest {
    pub message: Option<String>,
    /// Defaults to user 1
    pub user_id: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SentimentView {
    pub score: f64,
    pub magnitude: f64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChatResponse {
    pub response: String,
    /// "remote" or "local"
    pub source: String,
    pub sentiment: SentimentView,
}

impl From<PipelineResult> for ChatResponse {
    fn from(result: PipelineResult) -> Self {
        Self {
            response: result.reply_text,
            source: result.source.to_string(),
            sentiment: SentimentView {
                score: result.sentiment.score,
                magnitude: result.sentiment.magnitude,
            },
        }
    }
}

/// Send a message to the companion
#[utoipa::path(
    post,
    path = "/api/chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Reply generated", body = ChatResponse),
        (status = 400, description = "Message is required")
    ),
    tag = "chat"
)]
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> ApiResult<Json<ChatResponse>> {
    let Json(req) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Unreadable chat body");
        PipelineError::message_required()
    })?;

    let user_id = req.user_id.map(UserId).unwrap_or_default();
    let message = req.message.unwrap_or_default();

    let result = state.pipeline.handle(user_id, &message).await?;

    Ok(Json(result.into()))
}
