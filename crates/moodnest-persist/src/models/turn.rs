use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use std::fmt;

/// Opaque numeric handle identifying a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl UserId {
    /// Handle used when the caller does not name a user
    pub const DEFAULT: UserId = UserId(1);
}

impl Default for UserId {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

impl TurnRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnRole::User => "user",
            TurnRole::Assistant => "assistant",
        }
    }
}

/// One persisted message of a conversation; immutable once stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub id: String,
    pub user_id: UserId,
    pub role: TurnRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl ConversationTurn {
    pub fn new(user_id: UserId, role: TurnRole, content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id,
            role,
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}

// Conversion: ConversationTurn → moodnest_llm::Message
impl From<&ConversationTurn> for moodnest_llm::Message {
    fn from(turn: &ConversationTurn) -> Self {
        match turn.role {
            TurnRole::User => moodnest_llm::Message::human(turn.content.clone()),
            TurnRole::Assistant => moodnest_llm::Message::ai(turn.content.clone()),
        }
    }
}
