pub mod models;
pub mod trait_client;
pub mod dbs;
pub mod error;
pub mod builder;

pub use models::{ConversationTurn, SentimentSample, TurnRole, UserId};
pub use trait_client::ConversationStore;
pub use dbs::InMemoryStore;
pub use error::PersistError;
pub use builder::{StoreBackend, StoreBuilder};

#[cfg(feature = "mongodb")]
pub use dbs::MongoConversationStore;
