//! Reply pipeline for the MoodNest companion.
//!
//! A message goes to the remote responder first. When the remote responder is
//! unavailable the local responder answers, and it always returns the crisis
//! message for text containing a self-harm indicator. Both turns and a
//! sentiment sample are logged to the conversation store afterwards.

pub mod builder;
pub mod companions;
pub mod crisis;
pub mod error;
pub mod local;
pub mod observer;
pub mod pipeline;
pub mod remote;
pub mod sentiment;
pub mod types;

pub use builder::PipelineBuilder;
pub use companions::{CompanionReply, CopingCategory, CopingCoach, DailyPlanner, TimeOfDay};
pub use crisis::{CrisisDetector, CRISIS_KEYWORDS, CRISIS_MESSAGE};
pub use error::PipelineError;
pub use local::{FixedPicker, LocalResponder, ReplyPicker, SeededPicker, ThreadRngPicker, GENERIC_REPLIES};
pub use observer::{PipelineObserver, StoreStage, TracingObserver};
pub use pipeline::Pipeline;
pub use remote::{
    GeminiResponder, OfflineResponder, RemoteConfig, RemoteReply, RemoteResponder, UnavailableReason,
    COMPANION_PERSONA,
};
pub use sentiment::SentimentScorer;
pub use types::{CrisisPolicy, PipelineConfig, PipelineResult, ReplySource, Sentiment};
