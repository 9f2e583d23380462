mod sentiment;
mod turn;

// Export database-agnostic models
pub use sentiment::SentimentSample;
pub use turn::{ConversationTurn, TurnRole, UserId};
