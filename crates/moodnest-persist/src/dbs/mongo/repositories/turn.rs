use mongodb::{Client, Collection, bson::doc};
use futures::TryStreamExt;

use crate::dbs::mongo::models::MongoTurn;
use crate::error::Result;

#[derive(Clone)]
pub struct MongoTurnRepository {
    collection: Collection<MongoTurn>,
}

impl MongoTurnRepository {
    pub fn new(client: &Client, db_name: &str) -> Self {
        let collection = client.database(db_name).collection("chats");
        Self { collection }
    }

    /// Insert a single turn
    pub async fn insert_turn(&self, turn: &MongoTurn) -> Result<()> {
        self.collection.insert_one(turn).await?;
        Ok(())
    }

    /// Most recent turns for a user, oldest first
    ///
    /// ObjectIds grow monotonically per process, so `_id` breaks
    /// `created_at` ties in insertion order.
    pub async fn recent_turns(&self, user_id: i64, limit: usize) -> Result<Vec<MongoTurn>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let filter = doc! { "user_id": user_id };
        let mut turns: Vec<MongoTurn> = self.collection
            .find(filter)
            .sort(doc! { "created_at": -1, "_id": -1 })
            .limit(i64::try_from(limit).unwrap_or(i64::MAX))
            .await?
            .try_collect()
            .await?;
        turns.reverse();
        Ok(turns)
    }
}
