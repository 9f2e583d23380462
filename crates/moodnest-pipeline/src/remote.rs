use async_trait::async_trait;
use moodnest_llm::{
    is_usable_api_key, ChatClient, ChatOptions, ChatRequest, ClientFactory, GeminiConfig, Message,
    SafetySetting,
};
use moodnest_persist::ConversationTurn;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::types::{DEFAULT_MODEL, DEFAULT_REMOTE_TIMEOUT};

/// Persona sent as the system instruction on every conversational call
pub const COMPANION_PERSONA: &str = "You are a compassionate, empathetic, and supportive Mental Health Companion.
Your goal is to listen to the user, validate their feelings, and provide gentle advice, daily plans, or tips to improve their well-being.
You are NOT a doctor. If the user expresses self-harm or severe crisis, gently encourage them to seek professional help immediately.
Your tone should be warm, friendly, and non-judgmental.";

/// Why the remote responder produced no reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnavailableReason {
    MissingCredentials,
    Timeout,
    Api(String),
    Blocked(String),
    Empty,
}

impl fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnavailableReason::MissingCredentials => write!(f, "missing credentials"),
            UnavailableReason::Timeout => write!(f, "timed out"),
            UnavailableReason::Api(msg) => write!(f, "api error: {}", msg),
            UnavailableReason::Blocked(reason) => write!(f, "blocked: {}", reason),
            UnavailableReason::Empty => write!(f, "empty response"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteReply {
    Reply(String),
    Unavailable(UnavailableReason),
}

impl RemoteReply {
    pub fn into_text(self) -> Option<String> {
        match self {
            RemoteReply::Reply(text) => Some(text),
            RemoteReply::Unavailable(_) => None,
        }
    }
}

/// Network-dependent reply source
///
/// Implementations never fail: every problem is folded into
/// [`RemoteReply::Unavailable`] so callers can fall back locally.
#[async_trait]
pub trait RemoteResponder: Send + Sync {
    /// Reply to `text` given prior turns, oldest-first
    async fn generate(&self, history: &[ConversationTurn], text: &str) -> RemoteReply;

    /// One-shot completion with a caller-chosen system instruction
    async fn complete(&self, instruction: &str, prompt: &str) -> RemoteReply;
}

/// Settings for [`GeminiResponder`]
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Absent, blank or placeholder means every call is unavailable
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: String,
    /// Bound on the whole remote call
    pub timeout: Duration,
}

impl RemoteConfig {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            ..Default::default()
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn has_credentials(&self) -> bool {
        is_usable_api_key(self.api_key.as_deref())
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_REMOTE_TIMEOUT,
        }
    }
}

/// Remote responder backed by a Gemini chat client
pub struct GeminiResponder {
    config: RemoteConfig,
    client: Option<Arc<dyn ChatClient>>,
}

impl GeminiResponder {
    /// Build the HTTP client from config; without usable credentials no client is created
    pub fn from_config(config: RemoteConfig) -> Self {
        let client = match config.api_key.as_deref() {
            Some(key) if config.has_credentials() => {
                let mut gemini = GeminiConfig::new(key);
                if let Some(base_url) = &config.base_url {
                    gemini = gemini.with_base_url(base_url.clone());
                }
                match ClientFactory::create_chat_client(gemini) {
                    Ok(client) => Some(client),
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to create Gemini client, running local-only");
                        None
                    }
                }
            }
            _ => {
                tracing::warn!("GEMINI_API_KEY not set, replies will come from the local responder");
                None
            }
        };

        Self { config, client }
    }

    /// Use an existing client; credentials in `config` still gate every call
    pub fn with_client(config: RemoteConfig, client: Arc<dyn ChatClient>) -> Self {
        Self {
            config,
            client: Some(client),
        }
    }

    pub fn config(&self) -> &RemoteConfig {
        &self.config
    }

    pub fn is_configured(&self) -> bool {
        self.config.has_credentials() && self.client.is_some()
    }

    fn request(&self, instruction: &str, messages: Vec<Message>) -> ChatRequest {
        ChatRequest::new(self.config.model.clone(), messages)
            .with_system_instruction(instruction)
            .with_options(
                ChatOptions::new().safety_settings(SafetySetting::block_medium_and_above()),
            )
    }

    async fn call(&self, request: ChatRequest) -> RemoteReply {
        if !self.config.has_credentials() {
            return RemoteReply::Unavailable(UnavailableReason::MissingCredentials);
        }
        let Some(client) = &self.client else {
            return RemoteReply::Unavailable(UnavailableReason::MissingCredentials);
        };

        tracing::debug!(
            model = %self.config.model,
            messages = request.messages.len(),
            "Calling remote model"
        );

        let response = match tokio::time::timeout(self.config.timeout, client.chat(request)).await {
            Err(_) => return RemoteReply::Unavailable(UnavailableReason::Timeout),
            Ok(Err(e)) => return RemoteReply::Unavailable(UnavailableReason::Api(e.to_string())),
            Ok(Ok(response)) => response,
        };

        if response.is_blocked() {
            let reason = response
                .block_reason
                .clone()
                .or_else(|| response.finish_reason.clone())
                .unwrap_or_else(|| "SAFETY".to_string());
            return RemoteReply::Unavailable(UnavailableReason::Blocked(reason));
        }

        match response.text() {
            Some(text) => RemoteReply::Reply(text.to_string()),
            None => RemoteReply::Unavailable(UnavailableReason::Empty),
        }
    }
}

#[async_trait]
impl RemoteResponder for GeminiResponder {
    async fn generate(&self, history: &[ConversationTurn], text: &str) -> RemoteReply {
        let mut messages: Vec<Message> = history.iter().map(Message::from).collect();
        messages.push(Message::human(text));
        self.call(self.request(COMPANION_PERSONA, messages)).await
    }

    async fn complete(&self, instruction: &str, prompt: &str) -> RemoteReply {
        self.call(self.request(instruction, vec![Message::human(prompt)]))
            .await
    }
}

/// Responder that is always unavailable; used when no remote is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineResponder;

#[async_trait]
impl RemoteResponder for OfflineResponder {
    async fn generate(&self, _history: &[ConversationTurn], _text: &str) -> RemoteReply {
        RemoteReply::Unavailable(UnavailableReason::MissingCredentials)
    }

    async fn complete(&self, _instruction: &str, _prompt: &str) -> RemoteReply {
        RemoteReply::Unavailable(UnavailableReason::MissingCredentials)
    }
}
