use axum::{extract::State, Json};
use chrono::Timelike;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use moodnest_persist::{ConversationTurn, UserId};
use crate::{error::ApiResult, state::AppState};

/// Recent turns handed to the planner as context
const PLANNER_CONTEXT_TURNS: usize = 5;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct PlannerRequest {
    /// Defaults to "neutral"
    pub mood: Option<String>,
    /// Whose recent turns to use as context (default 1)
    pub user_id: Option<i64>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ResourceRequest {
    /// Defaults to "general"
    pub mood: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AgentResponse {
    pub response: String,
    /// "planner_agent" or "resource_agent"
    pub source: String,
}

/// Daily plan for the current time of day
#[utoipa::path(
    post,
    path = "/api/agent/planner",
    request_body(content = PlannerRequest, description = "Optional mood"),
    responses(
        (status = 200, description = "Plan generated", body = AgentResponse)
    ),
    tag = "agents"
)]
pub async fn planner(
    State(state): State<Arc<AppState>>,
    body: Option<Json<PlannerRequest>>,
) -> ApiResult<Json<AgentResponse>> {
    let req = body.map(|Json(req)| req).unwrap_or_default();
    let mood = req.mood.unwrap_or_else(|| "neutral".to_string());
    let user_id = req.user_id.map(UserId).unwrap_or_default();

    let context = recent_context(&state, user_id).await;
    let hour = chrono::Local::now().hour();

    let reply = state.planner.plan(&mood, &context, hour).await;
    tracing::info!(source = %reply.source, hour = hour, "Planner responded");

    Ok(Json(AgentResponse {
        response: reply.text,
        source: "planner_agent".to_string(),
    }))
}

/// Coping strategy matched to a mood
#[utoipa::path(
    post,
    path = "/api/agent/resource",
    request_body(content = ResourceRequest, description = "Optional mood"),
    responses(
        (status = 200, description = "Strategy generated", body = AgentResponse)
    ),
    tag = "agents"
)]
pub async fn resource(
    State(state): State<Arc<AppState>>,
    body: Option<Json<ResourceRequest>>,
) -> ApiResult<Json<AgentResponse>> {
    let req = body.map(|Json(req)| req).unwrap_or_default();
    let mood = req.mood.unwrap_or_else(|| "general".to_string());

    let reply = state.coach.strategy(&mood).await;
    tracing::info!(source = %reply.source, "Coping coach responded");

    Ok(Json(AgentResponse {
        response: reply.text,
        source: "resource_agent".to_string(),
    }))
}

async fn recent_context(state: &AppState, user_id: UserId) -> Vec<ConversationTurn> {
    let fetch = state.store.fetch_recent_turns(user_id, PLANNER_CONTEXT_TURNS);
    match tokio::time::timeout(state.config.store.timeout(), fetch).await {
        Ok(Ok(turns)) => turns,
        Ok(Err(e)) => {
            tracing::warn!(user_id = %user_id, error = %e, "Planner context unavailable");
            Vec::new()
        }
        Err(_) => {
            tracing::warn!(user_id = %user_id, "Planner context fetch timed out");
            Vec::new()
        }
    }
}
