use moodnest_persist::{ConversationStore, ConversationTurn, PersistError, TurnRole, UserId};
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use crate::builder::PipelineBuilder;
use crate::error::{PipelineError, Result};
use crate::local::LocalResponder;
use crate::observer::{PipelineObserver, StoreStage};
use crate::remote::{RemoteReply, RemoteResponder, UnavailableReason};
use crate::sentiment::SentimentScorer;
use crate::types::{CrisisPolicy, PipelineConfig, PipelineResult, ReplySource};

/// Turns one user message into one reply
///
/// Holds no per-request state; share it behind an `Arc`.
pub struct Pipeline {
    store: Arc<dyn ConversationStore>,
    remote: Arc<dyn RemoteResponder>,
    local: LocalResponder,
    scorer: SentimentScorer,
    observer: Arc<dyn PipelineObserver>,
    config: PipelineConfig,
}

impl Pipeline {
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    pub(crate) fn new(
        store: Arc<dyn ConversationStore>,
        remote: Arc<dyn RemoteResponder>,
        local: LocalResponder,
        observer: Arc<dyn PipelineObserver>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            store,
            remote,
            local,
            scorer: SentimentScorer::new(),
            observer,
            config,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Process one message: reply, log both turns, score and log sentiment
    ///
    /// Only empty input is an error, and it is rejected before any store access.
    /// Store and remote failures are reported to the observer and never change
    /// the reply.
    pub async fn handle(&self, user_id: UserId, text: &str) -> Result<PipelineResult> {
        if text.is_empty() {
            return Err(PipelineError::message_required());
        }

        let start = Instant::now();
        tracing::debug!(user_id = %user_id, "Handling message");

        let (reply_text, source) = self.generate_reply(user_id, text).await;

        self.log_turn(user_id, TurnRole::User, text, StoreStage::UserTurn).await;
        self.log_turn(user_id, TurnRole::Assistant, &reply_text, StoreStage::AssistantTurn)
            .await;

        let sentiment = self.scorer.score(text);
        let appended = self
            .bounded(self.store.append_sentiment(user_id, sentiment.score, sentiment.magnitude))
            .await;
        if let Err(e) = appended {
            self.report_store_error(user_id, StoreStage::Sentiment, e).await;
        }

        let result = PipelineResult {
            reply_text,
            source,
            sentiment,
        };

        let duration_ms = start.elapsed().as_millis() as u64;
        if let Err(e) = self
            .observer
            .on_completed(user_id, result.clone(), duration_ms)
            .await
        {
            tracing::error!(error = %e, "Observer failed on completion");
        }

        Ok(result)
    }

    async fn generate_reply(&self, user_id: UserId, text: &str) -> (String, ReplySource) {
        if self.config.crisis_policy == CrisisPolicy::InterceptBeforeRemote
            && self.local.detector().detect(text)
        {
            tracing::info!(user_id = %user_id, "Crisis text intercepted before remote call");
            return (self.local.respond(text), ReplySource::Local);
        }

        let history = self.fetch_history(user_id).await;

        match self.remote.generate(&history, text).await {
            RemoteReply::Reply(reply) => (reply, ReplySource::Remote),
            RemoteReply::Unavailable(reason) => {
                self.report_unavailable(user_id, reason).await;
                (self.local.respond(text), ReplySource::Local)
            }
        }
    }

    async fn fetch_history(&self, user_id: UserId) -> Vec<ConversationTurn> {
        let fetched = self
            .bounded(self.store.fetch_recent_turns(user_id, self.config.history_limit))
            .await;
        match fetched {
            Ok(turns) => turns,
            Err(e) => {
                self.report_store_error(user_id, StoreStage::FetchHistory, e).await;
                Vec::new()
            }
        }
    }

    async fn log_turn(&self, user_id: UserId, role: TurnRole, content: &str, stage: StoreStage) {
        if let Err(e) = self.bounded(self.store.append_turn(user_id, role, content)).await {
            self.report_store_error(user_id, stage, e).await;
        }
    }

    /// Run one store call under the configured store timeout
    async fn bounded<T>(
        &self,
        call: impl Future<Output = std::result::Result<T, PersistError>>,
    ) -> std::result::Result<T, String> {
        match tokio::time::timeout(self.config.store_timeout, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(e.to_string()),
            Err(_) => Err(format!(
                "store call timed out after {}ms",
                self.config.store_timeout.as_millis()
            )),
        }
    }

    async fn report_unavailable(&self, user_id: UserId, reason: UnavailableReason) {
        if let Err(e) = self.observer.on_remote_unavailable(user_id, reason).await {
            tracing::error!(error = %e, "Observer failed on remote unavailable");
        }
    }

    async fn report_store_error(&self, user_id: UserId, stage: StoreStage, error: String) {
        if let Err(e) = self.observer.on_store_error(user_id, stage, error).await {
            tracing::error!(error = %e, "Observer failed on store error");
        }
    }
}
