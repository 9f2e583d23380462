#![allow(dead_code)]

use anyhow::{bail, Result};
use async_trait::async_trait;
use moodnest_llm::{ChatClient, ChatRequest, ChatResponse};
use moodnest_persist::{
    ConversationStore, ConversationTurn, InMemoryStore, PersistError, SentimentSample, TurnRole, UserId,
};
use moodnest_pipeline::{PipelineObserver, PipelineResult, RemoteReply, RemoteResponder, StoreStage, UnavailableReason};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// In-memory store that counts every call and can fail on demand
#[derive(Default)]
pub struct ScriptedStore {
    inner: InMemoryStore,
    pub calls: AtomicUsize,
    pub fail_fetch: AtomicBool,
    pub fail_user_turn: AtomicBool,
    pub fail_assistant_turn: AtomicBool,
    pub fail_sentiment: AtomicBool,
    /// Every call hangs for an hour before touching the log
    pub stall: AtomicBool,
    pub attempted_roles: Mutex<Vec<TurnRole>>,
}

impl ScriptedStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn attempted_roles(&self) -> Vec<TurnRole> {
        self.attempted_roles.lock().unwrap().clone()
    }

    pub async fn turns(&self, user_id: UserId) -> Vec<ConversationTurn> {
        self.inner.fetch_recent_turns(user_id, usize::MAX).await.unwrap()
    }

    pub async fn samples(&self, user_id: UserId) -> Vec<SentimentSample> {
        self.inner.sentiment_history(user_id).await.unwrap()
    }

    async fn maybe_stall(&self) {
        if self.stall.load(Ordering::SeqCst) {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
    }

    pub async fn seed(&self, user_id: UserId, role: TurnRole, content: &str) {
        self.inner.append_turn(user_id, role, content).await.unwrap();
    }
}

fn unavailable() -> PersistError {
    PersistError::Connection("store offline".to_string())
}

#[async_trait]
impl ConversationStore for ScriptedStore {
    async fn fetch_recent_turns(&self, user_id: UserId, limit: usize) -> moodnest_persist::error::Result<Vec<ConversationTurn>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.maybe_stall().await;
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        self.inner.fetch_recent_turns(user_id, limit).await
    }

    async fn append_turn(&self, user_id: UserId, role: TurnRole, content: &str) -> moodnest_persist::error::Result<ConversationTurn> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.attempted_roles.lock().unwrap().push(role);
        self.maybe_stall().await;
        let fail = match role {
            TurnRole::User => &self.fail_user_turn,
            TurnRole::Assistant => &self.fail_assistant_turn,
        };
        if fail.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        self.inner.append_turn(user_id, role, content).await
    }

    async fn append_sentiment(&self, user_id: UserId, score: f64, magnitude: f64) -> moodnest_persist::error::Result<SentimentSample> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.maybe_stall().await;
        if self.fail_sentiment.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        self.inner.append_sentiment(user_id, score, magnitude).await
    }

    async fn sentiment_history(&self, user_id: UserId) -> moodnest_persist::error::Result<Vec<SentimentSample>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.sentiment_history(user_id).await
    }
}

/// Remote responder returning a fixed reply and recording what it was given
pub struct ScriptedRemote {
    reply: RemoteReply,
    pub calls: AtomicUsize,
    pub history_lengths: Mutex<Vec<usize>>,
}

impl ScriptedRemote {
    pub fn replying(text: &str) -> Self {
        Self::new(RemoteReply::Reply(text.to_string()))
    }

    pub fn unavailable(reason: UnavailableReason) -> Self {
        Self::new(RemoteReply::Unavailable(reason))
    }

    fn new(reply: RemoteReply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            history_lengths: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RemoteResponder for ScriptedRemote {
    async fn generate(&self, history: &[ConversationTurn], _text: &str) -> RemoteReply {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.history_lengths.lock().unwrap().push(history.len());
        self.reply.clone()
    }

    async fn complete(&self, _instruction: &str, _prompt: &str) -> RemoteReply {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone()
    }
}

pub enum ClientBehavior {
    Text(String),
    Blocked(String),
    Fail(String),
    Slow(Duration),
}

/// Chat client that records requests and answers per its behavior
pub struct MockChatClient {
    behavior: ClientBehavior,
    pub requests: Mutex<Vec<ChatRequest>>,
}

impl MockChatClient {
    pub fn new(behavior: ClientBehavior) -> Self {
        Self {
            behavior,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<ChatRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

fn response(content: Option<String>, block_reason: Option<String>) -> ChatResponse {
    ChatResponse {
        content,
        finish_reason: Some("STOP".to_string()),
        block_reason,
        usage: None,
        raw: serde_json::Value::Null,
    }
}

#[async_trait]
impl ChatClient for MockChatClient {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        self.requests.lock().unwrap().push(request);
        match &self.behavior {
            ClientBehavior::Text(text) => Ok(response(Some(text.clone()), None)),
            ClientBehavior::Blocked(reason) => Ok(response(None, Some(reason.clone()))),
            ClientBehavior::Fail(msg) => bail!("{}", msg),
            ClientBehavior::Slow(delay) => {
                tokio::time::sleep(*delay).await;
                Ok(response(Some("too late".to_string()), None))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ObservedEvent {
    RemoteUnavailable(UnavailableReason),
    StoreError(StoreStage),
    Completed(PipelineResult),
}

#[derive(Default)]
pub struct RecordingObserver {
    pub events: Mutex<Vec<ObservedEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ObservedEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl PipelineObserver for RecordingObserver {
    async fn on_remote_unavailable(&self, _user_id: UserId, reason: UnavailableReason) -> Result<()> {
        self.events.lock().unwrap().push(ObservedEvent::RemoteUnavailable(reason));
        Ok(())
    }

    async fn on_store_error(&self, _user_id: UserId, stage: StoreStage, _error: String) -> Result<()> {
        self.events.lock().unwrap().push(ObservedEvent::StoreError(stage));
        Ok(())
    }

    async fn on_completed(&self, _user_id: UserId, result: PipelineResult, _duration_ms: u64) -> Result<()> {
        self.events.lock().unwrap().push(ObservedEvent::Completed(result));
        Ok(())
    }
}
