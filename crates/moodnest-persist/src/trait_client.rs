use async_trait::async_trait;
use crate::models::{ConversationTurn, SentimentSample, TurnRole, UserId};
use crate::error::Result;

/// Append-only conversation log plus sentiment log, keyed by user
///
/// Each individual append is atomic. No ordering is promised between
/// concurrent appends for the same user beyond that.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Up to `limit` most recent turns for a user, oldest first
    ///
    /// Ordering is by creation time, ties broken by insertion order.
    async fn fetch_recent_turns(&self, user_id: UserId, limit: usize) -> Result<Vec<ConversationTurn>>;

    /// Append one turn and return it as stored
    async fn append_turn(
        &self,
        user_id: UserId,
        role: TurnRole,
        content: &str,
    ) -> Result<ConversationTurn>;

    /// Append one sentiment sample and return it as stored
    async fn append_sentiment(
        &self,
        user_id: UserId,
        score: f64,
        magnitude: f64,
    ) -> Result<SentimentSample>;

    /// All sentiment samples for a user, oldest first
    async fn sentiment_history(&self, user_id: UserId) -> Result<Vec<SentimentSample>>;
}
