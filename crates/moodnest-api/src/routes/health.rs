use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use utoipa::ToSchema;

use moodnest_persist::UserId;
use crate::{error::ApiResult, state::AppState};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub services: HashMap<String, String>,
}

/// Health check endpoint
///
/// Returns the health status of the API and its dependencies
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<HealthResponse>> {
    let mut services = HashMap::new();

    match state.store.fetch_recent_turns(UserId::DEFAULT, 1).await {
        Ok(_) => services.insert("store".to_string(), "connected".to_string()),
        Err(e) => {
            tracing::warn!(error = %e, "Store health probe failed");
            services.insert("store".to_string(), "disconnected".to_string())
        }
    };

    let remote = if state.remote_configured { "configured" } else { "local_only" };
    services.insert("remote".to_string(), remote.to_string());

    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        services,
    }))
}
