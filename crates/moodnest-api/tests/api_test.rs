use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use moodnest_api::{build_router, config::Config, state::AppState};
use moodnest_llm::{ChatClient, ChatRequest, ChatResponse};
use moodnest_persist::{ConversationTurn, InMemoryStore};
use moodnest_pipeline::{
    GeminiResponder, OfflineResponder, RemoteConfig, RemoteReply, RemoteResponder, CRISIS_MESSAGE,
    GENERIC_REPLIES,
};

struct FixedRemote(&'static str);

#[async_trait]
impl RemoteResponder for FixedRemote {
    async fn generate(&self, _history: &[ConversationTurn], _text: &str) -> RemoteReply {
        RemoteReply::Reply(self.0.to_string())
    }

    async fn complete(&self, _instruction: &str, _prompt: &str) -> RemoteReply {
        RemoteReply::Reply(self.0.to_string())
    }
}

/// Chat client that never answers
struct HungClient;

#[async_trait]
impl ChatClient for HungClient {
    async fn chat(&self, _request: ChatRequest) -> anyhow::Result<ChatResponse> {
        tokio::time::sleep(std::time::Duration::from_secs(3600)).await;
        anyhow::bail!("client never answered")
    }
}

fn app_with(remote: Arc<dyn RemoteResponder>, configured: bool) -> Router {
    let state = AppState::new(Config::default(), Arc::new(InMemoryStore::new()), remote, configured).unwrap();
    build_router(Arc::new(state))
}

fn offline_app() -> Router {
    app_with(Arc::new(OfflineResponder), false)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn test_health_reports_services() {
    let app = offline_app();

    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["services"]["store"], "connected");
    assert_eq!(body["services"]["remote"], "local_only");
}

#[tokio::test]
async fn test_chat_rejects_empty_message() {
    let app = offline_app();

    for payload in [json!({"message": ""}), json!({}), json!({"user_id": 3})] {
        let (status, body) = send(&app, Method::POST, "/api/chat", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Message is required"}));
    }

    let (_, history) = send(&app, Method::GET, "/api/history", None).await;
    assert_eq!(history, json!([]));
}

#[tokio::test]
async fn test_chat_accepts_whitespace_message() {
    let app = offline_app();

    let (status, body) = send(&app, Method::POST, "/api/chat", Some(json!({"message": "   "}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "local");
    assert!(GENERIC_REPLIES.contains(&body["response"].as_str().unwrap()));

    let (_, history) = send(&app, Method::GET, "/api/history", None).await;
    assert_eq!(history.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_chat_rejects_unreadable_body() {
    let app = offline_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/chat")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_chat_crisis_message_local_path() {
    let app = offline_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/chat",
        Some(json!({"message": "I feel like I want to end it", "user_id": 1})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], CRISIS_MESSAGE);
    assert_eq!(body["source"], "local");
    assert!(body["sentiment"]["score"].is_number());
    assert!(body["sentiment"]["magnitude"].is_number());

    let (_, history) = send(&app, Method::GET, "/api/history?user_id=1", None).await;
    let turns = history.as_array().unwrap();
    assert_eq!(turns.len(), 2);
    assert_eq!(turns[0]["role"], "user");
    assert_eq!(turns[0]["content"], "I feel like I want to end it");
    assert_eq!(turns[1]["role"], "assistant");
    assert_eq!(turns[1]["content"], CRISIS_MESSAGE);
}

#[tokio::test]
async fn test_chat_local_reply_is_pool_member() {
    let app = offline_app();

    let (status, body) = send(&app, Method::POST, "/api/chat", Some(json!({"message": "had a rough day"}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "local");
    let reply = body["response"].as_str().unwrap();
    assert!(GENERIC_REPLIES.contains(&reply));
    let score = body["sentiment"]["score"].as_f64().unwrap();
    let magnitude = body["sentiment"]["magnitude"].as_f64().unwrap();
    assert!((-1.0..=1.0).contains(&score));
    assert!((0.0..=1.0).contains(&magnitude));
}

#[tokio::test]
async fn test_chat_remote_reply() {
    let app = app_with(Arc::new(FixedRemote("I'm glad you reached out.")), true);

    let (status, body) = send(&app, Method::POST, "/api/chat", Some(json!({"message": "hello"}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "I'm glad you reached out.");
    assert_eq!(body["source"], "remote");

    let (_, health) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(health["services"]["remote"], "configured");
}

#[tokio::test]
async fn test_users_are_isolated() {
    let app = offline_app();

    send(&app, Method::POST, "/api/chat", Some(json!({"message": "hi", "user_id": 2}))).await;

    let (_, default_user) = send(&app, Method::GET, "/api/history", None).await;
    let (_, other_user) = send(&app, Method::GET, "/api/history?user_id=2", None).await;
    assert_eq!(default_user, json!([]));
    assert_eq!(other_user.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_analytics_and_export() {
    let app = offline_app();

    send(&app, Method::POST, "/api/chat", Some(json!({"message": "I am happy today"}))).await;
    send(&app, Method::POST, "/api/chat", Some(json!({"message": "now I feel sad"}))).await;

    let (status, analytics) = send(&app, Method::GET, "/api/analytics?user_id=1", None).await;
    assert_eq!(status, StatusCode::OK);
    let samples = analytics.as_array().unwrap();
    assert_eq!(samples.len(), 2);
    assert!(samples[0]["score"].as_f64().unwrap() > 0.0);
    assert!(samples[1]["score"].as_f64().unwrap() < 0.0);
    assert!(samples[0]["timestamp"].is_string());

    let (status, export) = send(&app, Method::GET, "/api/export", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(export["user_id"], 1);
    assert!(export["exported_at"].is_string());
    assert_eq!(export["chats"].as_array().unwrap().len(), 4);
    assert_eq!(export["sentiment_logs"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_planner_fallback() {
    let app = offline_app();

    let (status, body) = send(&app, Method::POST, "/api/agent/planner", Some(json!({}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "planner_agent");
    let text = body["response"].as_str().unwrap();
    assert!(text.contains("Plan for You**\n\nBased on the time of day, here is a gentle plan:"));
    assert!(text.ends_with("*Remember: Small steps make a big difference.*"));
}

#[tokio::test]
async fn test_planner_accepts_empty_body() {
    let app = offline_app();

    let (status, body) = send(&app, Method::POST, "/api/agent/planner", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "planner_agent");
}

#[tokio::test]
async fn test_resource_fallback() {
    let app = offline_app();

    let (status, body) = send(&app, Method::POST, "/api/agent/resource", Some(json!({"mood": "stress"}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "resource_agent");
    assert!(body["response"].as_str().unwrap().starts_with("**Coping Strategy (Stress)**\n\n"));

    let (_, body) = send(&app, Method::POST, "/api/agent/resource", Some(json!({}))).await;
    assert!(body["response"].as_str().unwrap().starts_with("**Coping Strategy (General)**"));
}

#[tokio::test]
async fn test_openapi_document() {
    let app = offline_app();

    let (status, doc) = send(&app, Method::GET, "/api/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/api/chat"].is_object());
    assert!(doc["paths"]["/api/agent/planner"].is_object());
}

#[tokio::test(start_paused = true)]
async fn test_hung_remote_with_default_config_still_replies() {
    let config = Config::default();
    let remote_config = RemoteConfig::new(Some("test-key".to_string()))
        .with_model(config.llm.model.clone())
        .with_timeout(config.llm.timeout());
    let remote = GeminiResponder::with_client(remote_config, Arc::new(HungClient));
    let app = app_with(Arc::new(remote), true);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/chat",
        Some(json!({"message": "I feel like I want to end it"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], CRISIS_MESSAGE);
    assert_eq!(body["source"], "local");

    let (_, history) = send(&app, Method::GET, "/api/history", None).await;
    let turns = history.as_array().unwrap();
    assert_eq!(turns.len(), 2);
    assert_eq!(turns[1]["content"], CRISIS_MESSAGE);

    let (_, analytics) = send(&app, Method::GET, "/api/analytics", None).await;
    assert_eq!(analytics.as_array().unwrap().len(), 1);
}
