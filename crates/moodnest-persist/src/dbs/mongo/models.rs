use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

use crate::{ConversationTurn, SentimentSample, TurnRole, UserId};

/// MongoDB-specific turn document (uses ObjectId)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoTurn {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub user_id: i64,
    pub role: TurnRole,
    pub content: String,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

/// MongoDB-specific sentiment document (uses ObjectId)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoSentiment {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub user_id: i64,
    pub score: f64,
    pub magnitude: f64,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

// Conversions between database-agnostic and MongoDB-specific models.
// Stored documents get a fresh ObjectId; the agnostic id is its hex form.

impl From<ConversationTurn> for MongoTurn {
    fn from(turn: ConversationTurn) -> Self {
        Self {
            id: ObjectId::new(),
            user_id: turn.user_id.0,
            role: turn.role,
            content: turn.content,
            created_at: turn.created_at,
        }
    }
}

impl From<MongoTurn> for ConversationTurn {
    fn from(turn: MongoTurn) -> Self {
        Self {
            id: turn.id.to_hex(),
            user_id: UserId(turn.user_id),
            role: turn.role,
            content: turn.content,
            created_at: turn.created_at,
        }
    }
}

impl From<SentimentSample> for MongoSentiment {
    fn from(sample: SentimentSample) -> Self {
        Self {
            id: ObjectId::new(),
            user_id: sample.user_id.0,
            score: sample.score,
            magnitude: sample.magnitude,
            created_at: sample.created_at,
        }
    }
}

impl From<MongoSentiment> for SentimentSample {
    fn from(sample: MongoSentiment) -> Self {
        Self {
            id: sample.id.to_hex(),
            user_id: UserId(sample.user_id),
            score: sample.score,
            magnitude: sample.magnitude,
            created_at: sample.created_at,
        }
    }
}
