use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::models::{ConversationTurn, SentimentSample, TurnRole, UserId};
use crate::trait_client::ConversationStore;

#[derive(Default)]
struct Logs {
    /// Turns paired with their insertion sequence
    turns: Vec<(u64, ConversationTurn)>,
    sentiments: Vec<(u64, SentimentSample)>,
    next_sequence: u64,
}

impl Logs {
    fn bump(&mut self) -> u64 {
        let seq = self.next_sequence;
        self.next_sequence += 1;
        seq
    }
}

/// Process-local store, used when no database is configured and in tests
#[derive(Default)]
pub struct InMemoryStore {
    logs: RwLock<Logs>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of turns stored across all users
    pub async fn turn_count(&self) -> usize {
        self.logs.read().await.turns.len()
    }

    /// Number of sentiment samples stored across all users
    pub async fn sentiment_count(&self) -> usize {
        self.logs.read().await.sentiments.len()
    }
}

#[async_trait]
impl ConversationStore for InMemoryStore {
    async fn fetch_recent_turns(&self, user_id: UserId, limit: usize) -> Result<Vec<ConversationTurn>> {
        let logs = self.logs.read().await;

        let mut turns: Vec<&(u64, ConversationTurn)> = logs
            .turns
            .iter()
            .filter(|(_, turn)| turn.user_id == user_id)
            .collect();
        turns.sort_by(|(a_seq, a), (b_seq, b)| {
            a.created_at.cmp(&b.created_at).then(a_seq.cmp(b_seq))
        });

        let skip = turns.len().saturating_sub(limit);
        Ok(turns.into_iter().skip(skip).map(|(_, turn)| turn.clone()).collect())
    }

    async fn append_turn(
        &self,
        user_id: UserId,
        role: TurnRole,
        content: &str,
    ) -> Result<ConversationTurn> {
        // Timestamp under the lock so created_at agrees with the sequence
        let mut logs = self.logs.write().await;
        let turn = ConversationTurn::new(user_id, role, content);
        let seq = logs.bump();
        logs.turns.push((seq, turn.clone()));

        Ok(turn)
    }

    async fn append_sentiment(
        &self,
        user_id: UserId,
        score: f64,
        magnitude: f64,
    ) -> Result<SentimentSample> {
        let mut logs = self.logs.write().await;
        let sample = SentimentSample::new(user_id, score, magnitude)?;
        let seq = logs.bump();
        logs.sentiments.push((seq, sample.clone()));

        Ok(sample)
    }

    async fn sentiment_history(&self, user_id: UserId) -> Result<Vec<SentimentSample>> {
        let logs = self.logs.read().await;

        let mut samples: Vec<&(u64, SentimentSample)> = logs
            .sentiments
            .iter()
            .filter(|(_, sample)| sample.user_id == user_id)
            .collect();
        samples.sort_by(|(a_seq, a), (b_seq, b)| {
            a.created_at.cmp(&b.created_at).then(a_seq.cmp(b_seq))
        });

        Ok(samples.into_iter().map(|(_, sample)| sample.clone()).collect())
    }
}
