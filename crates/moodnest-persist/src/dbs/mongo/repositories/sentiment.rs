use mongodb::{Client, Collection, bson::doc};
use futures::TryStreamExt;

use crate::dbs::mongo::models::MongoSentiment;
use crate::error::Result;

#[derive(Clone)]
pub struct MongoSentimentRepository {
    collection: Collection<MongoSentiment>,
}

impl MongoSentimentRepository {
    pub fn new(client: &Client, db_name: &str) -> Self {
        let collection = client.database(db_name).collection("sentiment_logs");
        Self { collection }
    }

    pub async fn insert_sample(&self, sample: &MongoSentiment) -> Result<()> {
        self.collection.insert_one(sample).await?;
        Ok(())
    }

    /// All samples for a user, oldest first
    pub async fn samples_for_user(&self, user_id: i64) -> Result<Vec<MongoSentiment>> {
        let filter = doc! { "user_id": user_id };
        let samples = self.collection
            .find(filter)
            .sort(doc! { "created_at": 1, "_id": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(samples)
    }
}
