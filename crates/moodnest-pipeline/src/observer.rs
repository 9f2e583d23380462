use anyhow::Result;
use async_trait::async_trait;
use moodnest_persist::UserId;
use std::fmt;

use crate::remote::UnavailableReason;
use crate::types::PipelineResult;

/// Store operation that failed during a pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreStage {
    FetchHistory,
    UserTurn,
    AssistantTurn,
    Sentiment,
}

impl fmt::Display for StoreStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StoreStage::FetchHistory => "fetch_history",
            StoreStage::UserTurn => "user_turn",
            StoreStage::AssistantTurn => "assistant_turn",
            StoreStage::Sentiment => "sentiment",
        };
        f.write_str(name)
    }
}

/// Hook for the non-fatal events of a pipeline run
///
/// Errors returned here are logged by the pipeline and never change the reply.
#[async_trait]
pub trait PipelineObserver: Send + Sync {
    /// The remote responder produced nothing and the local path answered
    async fn on_remote_unavailable(&self, user_id: UserId, reason: UnavailableReason) -> Result<()>;

    /// A store read or write failed
    async fn on_store_error(&self, user_id: UserId, stage: StoreStage, error: String) -> Result<()>;

    /// A run finished and is about to return
    async fn on_completed(&self, user_id: UserId, result: PipelineResult, duration_ms: u64) -> Result<()>;
}

/// Default observer: structured log lines only
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

#[async_trait]
impl PipelineObserver for TracingObserver {
    async fn on_remote_unavailable(&self, user_id: UserId, reason: UnavailableReason) -> Result<()> {
        tracing::warn!(user_id = %user_id, reason = %reason, "Remote responder unavailable, using local reply");
        Ok(())
    }

    async fn on_store_error(&self, user_id: UserId, stage: StoreStage, error: String) -> Result<()> {
        tracing::warn!(user_id = %user_id, stage = %stage, error = %error, "Store operation failed");
        Ok(())
    }

    async fn on_completed(&self, user_id: UserId, result: PipelineResult, duration_ms: u64) -> Result<()> {
        tracing::info!(
            user_id = %user_id,
            source = %result.source,
            score = result.sentiment.score,
            duration_ms = duration_ms,
            "Message handled"
        );
        Ok(())
    }
}
