use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

use super::turn::UserId;
use crate::error::{PersistError, Result};

/// Emotional tone of one user message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentSample {
    pub id: String,
    pub user_id: UserId,
    /// Polarity in [-1.0, 1.0]
    pub score: f64,
    /// Subjectivity in [0.0, 1.0]
    pub magnitude: f64,
    pub created_at: DateTime<Utc>,
}

impl SentimentSample {
    /// Build a sample, rejecting values outside the documented ranges
    pub fn new(user_id: UserId, score: f64, magnitude: f64) -> Result<Self> {
        if !(-1.0..=1.0).contains(&score) {
            return Err(PersistError::InvalidSentiment(format!(
                "score {} outside [-1.0, 1.0]",
                score
            )));
        }
        if !(0.0..=1.0).contains(&magnitude) {
            return Err(PersistError::InvalidSentiment(format!(
                "magnitude {} outside [0.0, 1.0]",
                magnitude
            )));
        }

        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id,
            score,
            magnitude,
            created_at: Utc::now(),
        })
    }
}
