//! # MoodNest
//!
//! Conversational support backend. A user message goes to a Gemini-backed
//! responder first; when that is unavailable a local responder answers
//! instead, returning a fixed crisis message for text with self-harm
//! indicators. Every handled message is logged with a sentiment score.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use moodnest::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let remote = GeminiResponder::from_config(RemoteConfig::new(
//!         std::env::var("GEMINI_API_KEY").ok(),
//!     ));
//!
//!     let pipeline = Pipeline::builder()
//!         .store(Arc::new(InMemoryStore::new()))
//!         .remote(Arc::new(remote))
//!         .build()?;
//!
//!     let result = pipeline.handle(UserId::DEFAULT, "had a rough day").await?;
//!     println!("[{}] {}", result.source, result.reply_text);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **`moodnest-llm`**: chat types, `ChatClient` trait and the Gemini client
//! - **`moodnest-persist`**: conversation and sentiment log (in-memory or MongoDB)
//! - **`moodnest-pipeline`**: crisis detector, responders, sentiment scorer, pipeline
//!
//! The HTTP service lives in `moodnest-api`.

pub mod prelude;

pub use moodnest_pipeline::{
    CompanionReply, CopingCategory, CopingCoach, CrisisDetector, CrisisPolicy, DailyPlanner,
    FixedPicker, GeminiResponder, LocalResponder, OfflineResponder, Pipeline, PipelineBuilder,
    PipelineConfig, PipelineError, PipelineObserver, PipelineResult, RemoteConfig, RemoteReply,
    RemoteResponder, ReplyPicker, ReplySource, SeededPicker, Sentiment, SentimentScorer, StoreStage,
    ThreadRngPicker, TimeOfDay, TracingObserver, UnavailableReason, COMPANION_PERSONA, CRISIS_KEYWORDS,
    CRISIS_MESSAGE, GENERIC_REPLIES,
};

pub use moodnest_llm::{
    ChatClient, ChatOptions, ChatRequest, ChatResponse, ClientFactory, Content, GeminiClient,
    GeminiConfig, Message, SafetySetting,
};

pub use moodnest_persist::{
    ConversationStore, ConversationTurn, InMemoryStore, PersistError, SentimentSample, StoreBackend,
    StoreBuilder, TurnRole, UserId,
};

#[cfg(feature = "mongodb")]
pub use moodnest_persist::MongoConversationStore;
