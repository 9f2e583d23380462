//! Prelude module for convenient imports
//!
//! Import everything you need with:
//! ```rust
//! use moodnest::prelude::*;
//! ```

pub use crate::{
    Pipeline, PipelineBuilder, PipelineConfig, PipelineResult, PipelineError, CrisisPolicy,
    ReplySource, Sentiment,
    RemoteResponder, RemoteConfig, RemoteReply, GeminiResponder, OfflineResponder,
    LocalResponder, ReplyPicker, ThreadRngPicker, SeededPicker, FixedPicker,
    PipelineObserver, TracingObserver,
    DailyPlanner, CopingCoach,
    ChatClient, Message,
    ConversationStore, ConversationTurn, InMemoryStore, StoreBuilder, TurnRole, UserId,
};
