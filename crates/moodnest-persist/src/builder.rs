use std::sync::Arc;

use crate::dbs::InMemoryStore;
use crate::error::{PersistError, Result};
use crate::trait_client::ConversationStore;

/// Which store implementation to construct
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    #[default]
    Memory,
    MongoDb,
}

impl std::str::FromStr for StoreBackend {
    type Err = PersistError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "in_memory" => Ok(StoreBackend::Memory),
            "mongodb" | "mongo" => Ok(StoreBackend::MongoDb),
            other => Err(PersistError::UnsupportedBackend(other.to_string())),
        }
    }
}

pub struct StoreBuilder {
    backend: StoreBackend,
    mongodb_uri: Option<String>,
    database: Option<String>,
}

impl StoreBuilder {
    pub fn new() -> Self {
        Self {
            backend: StoreBackend::Memory,
            mongodb_uri: None,
            database: None,
        }
    }

    pub fn backend(mut self, backend: StoreBackend) -> Self {
        self.backend = backend;
        self
    }

    pub fn mongodb_uri(mut self, uri: impl Into<String>) -> Self {
        self.mongodb_uri = Some(uri.into());
        self
    }

    pub fn database(mut self, db: impl Into<String>) -> Self {
        self.database = Some(db.into());
        self
    }

    pub async fn build(self) -> Result<Arc<dyn ConversationStore>> {
        match self.backend {
            StoreBackend::Memory => {
                tracing::info!("Using in-memory conversation store");
                Ok(Arc::new(InMemoryStore::new()))
            }
            StoreBackend::MongoDb => self.build_mongo().await,
        }
    }

    #[cfg(feature = "mongodb")]
    async fn build_mongo(self) -> Result<Arc<dyn ConversationStore>> {
        let mongodb_uri = self.mongodb_uri
            .ok_or_else(|| PersistError::Internal("mongodb_uri is required".to_string()))?;
        let database = self.database
            .ok_or_else(|| PersistError::Internal("database is required".to_string()))?;

        tracing::info!(database = %database, "Connecting to MongoDB");
        let store = crate::dbs::MongoConversationStore::connect(&mongodb_uri, &database).await?;
        Ok(Arc::new(store))
    }

    #[cfg(not(feature = "mongodb"))]
    async fn build_mongo(self) -> Result<Arc<dyn ConversationStore>> {
        Err(PersistError::UnsupportedBackend(
            "mongodb (crate built without the `mongodb` feature)".to_string(),
        ))
    }
}

impl Default for StoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}
