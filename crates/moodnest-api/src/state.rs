use std::sync::Arc;

use moodnest_persist::{ConversationStore, StoreBuilder};
use moodnest_pipeline::{
    CopingCoach, DailyPlanner, GeminiResponder, Pipeline, RemoteConfig, RemoteResponder,
    ReplyPicker, ThreadRngPicker,
};

use crate::config::Config;
use crate::error::{ApiError, ApiResult};

/// Shared application state passed to all handlers
///
/// Everything is behind `Arc`; the pipeline and companions hold no
/// per-request state and are built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<dyn ConversationStore>,
    pub pipeline: Arc<Pipeline>,
    pub planner: Arc<DailyPlanner>,
    pub coach: Arc<CopingCoach>,
    /// False when running local-only (no usable Gemini key)
    pub remote_configured: bool,
}

impl AppState {
    pub fn new(
        config: Config,
        store: Arc<dyn ConversationStore>,
        remote: Arc<dyn RemoteResponder>,
        remote_configured: bool,
    ) -> ApiResult<Self> {
        let picker: Arc<dyn ReplyPicker> = Arc::new(ThreadRngPicker);

        let pipeline = Pipeline::builder()
            .store(store.clone())
            .remote(remote.clone())
            .picker(picker.clone())
            .config(config.pipeline_config())
            .build()?;

        Ok(Self {
            config: Arc::new(config),
            store,
            pipeline: Arc::new(pipeline),
            planner: Arc::new(DailyPlanner::new(remote.clone(), picker.clone())),
            coach: Arc::new(CopingCoach::new(remote, picker)),
            remote_configured,
        })
    }

    /// Build the store and remote responder described by `config`
    pub async fn from_config(config: Config) -> ApiResult<Self> {
        let backend = config
            .store
            .backend()
            .map_err(|e| ApiError::Config(e.to_string()))?;

        let mut store_builder = StoreBuilder::new()
            .backend(backend)
            .database(config.store.database.clone());
        if let Some(uri) = &config.mongodb_uri {
            store_builder = store_builder.mongodb_uri(uri.clone());
        }
        let store = store_builder.build().await?;

        let remote_config = RemoteConfig::new(config.gemini_api_key.clone())
            .with_model(config.llm.model.clone())
            .with_timeout(config.llm.timeout());
        let responder = GeminiResponder::from_config(remote_config);
        let remote_configured = responder.is_configured();

        Self::new(config, store, Arc::new(responder), remote_configured)
    }
}
