pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::config::CorsConfig;
use crate::routes::{agents, chat, health, history};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        chat::send_message,
        history::get_history,
        history::get_analytics,
        history::export_data,
        agents::planner,
        agents::resource,
    ),
    components(schemas(
        health::HealthResponse,
        chat::ChatRequest,
        chat::ChatResponse,
        chat::SentimentView,
        history::TurnView,
        history::SentimentLogView,
        history::ExportResponse,
        agents::PlannerRequest,
        agents::ResourceRequest,
        agents::AgentResponse,
    )),
    tags(
        (name = "health", description = "Service health"),
        (name = "chat", description = "Companion conversation"),
        (name = "history", description = "Conversation and sentiment logs"),
        (name = "agents", description = "Daily planner and coping strategies")
    )
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Full router with middleware
pub fn build_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        // Health
        .route("/health", get(health::health_check))
        // Chat
        .route("/api/chat", post(chat::send_message))
        // Read views
        .route("/api/history", get(history::get_history))
        .route("/api/analytics", get(history::get_analytics))
        .route("/api/export", get(history::export_data))
        // Companions
        .route("/api/agent/planner", post(agents::planner))
        .route("/api/agent/resource", post(agents::resource))
        // Docs
        .route("/api/openapi.json", get(openapi_json));

    let request_timeout = Duration::from_secs(state.config.server.request_timeout_secs);
    let cors = build_cors_layer(&state.config.cors);

    api_routes
        .layer(axum_middleware::from_fn(middleware::logging::log_request))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    if config.enabled {
        let mut cors = CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers(Any);

        if config.origins.iter().any(|o| o == "*") {
            cors = cors.allow_origin(Any);
        } else {
            let origins: Vec<axum::http::HeaderValue> = config
                .origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();
            cors = cors.allow_origin(origins);
        }

        cors
    } else {
        CorsLayer::new()
    }
}
