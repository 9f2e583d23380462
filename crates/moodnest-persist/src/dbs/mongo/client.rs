use mongodb::Client;
use async_trait::async_trait;

use crate::trait_client::ConversationStore;
use crate::models::{ConversationTurn, SentimentSample, TurnRole, UserId};
use crate::dbs::mongo::models::{MongoSentiment, MongoTurn};
use crate::dbs::mongo::repositories::{MongoSentimentRepository, MongoTurnRepository};
use crate::error::{Result, PersistError};

pub struct MongoConversationStore {
    turn_repo: MongoTurnRepository,
    sentiment_repo: MongoSentimentRepository,
}

impl MongoConversationStore {
    /// Connect to MongoDB and create the store
    pub async fn connect(mongodb_uri: &str, database: &str) -> Result<Self> {
        let client = Client::with_uri_str(mongodb_uri)
            .await
            .map_err(|e| PersistError::Connection(e.to_string()))?;

        Ok(Self {
            turn_repo: MongoTurnRepository::new(&client, database),
            sentiment_repo: MongoSentimentRepository::new(&client, database),
        })
    }
}

#[async_trait]
impl ConversationStore for MongoConversationStore {
    async fn fetch_recent_turns(&self, user_id: UserId, limit: usize) -> Result<Vec<ConversationTurn>> {
        let turns = self.turn_repo.recent_turns(user_id.0, limit).await?;
        Ok(turns.into_iter().map(Into::into).collect())
    }

    async fn append_turn(
        &self,
        user_id: UserId,
        role: TurnRole,
        content: &str,
    ) -> Result<ConversationTurn> {
        let mongo_turn: MongoTurn = ConversationTurn::new(user_id, role, content).into();
        self.turn_repo.insert_turn(&mongo_turn).await?;
        Ok(mongo_turn.into())
    }

    async fn append_sentiment(
        &self,
        user_id: UserId,
        score: f64,
        magnitude: f64,
    ) -> Result<SentimentSample> {
        let mongo_sample: MongoSentiment = SentimentSample::new(user_id, score, magnitude)?.into();
        self.sentiment_repo.insert_sample(&mongo_sample).await?;
        Ok(mongo_sample.into())
    }

    async fn sentiment_history(&self, user_id: UserId) -> Result<Vec<SentimentSample>> {
        let samples = self.sentiment_repo.samples_for_user(user_id.0).await?;
        Ok(samples.into_iter().map(Into::into).collect())
    }
}
