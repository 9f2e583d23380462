use moodnest_persist::ConversationStore;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{PipelineError, Result};
use crate::local::{LocalResponder, ReplyPicker, ThreadRngPicker};
use crate::observer::{PipelineObserver, TracingObserver};
use crate::pipeline::Pipeline;
use crate::remote::RemoteResponder;
use crate::types::{CrisisPolicy, PipelineConfig};

/// Builder for constructing a [`Pipeline`]
///
/// Store and remote responder are required. The reply picker defaults to the
/// thread RNG and the observer to [`TracingObserver`].
pub struct PipelineBuilder {
    store: Option<Arc<dyn ConversationStore>>,
    remote: Option<Arc<dyn RemoteResponder>>,
    picker: Option<Arc<dyn ReplyPicker>>,
    observer: Option<Arc<dyn PipelineObserver>>,
    config: PipelineConfig,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self {
            store: None,
            remote: None,
            picker: None,
            observer: None,
            config: PipelineConfig::default(),
        }
    }

    pub fn store(mut self, store: Arc<dyn ConversationStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn remote(mut self, remote: Arc<dyn RemoteResponder>) -> Self {
        self.remote = Some(remote);
        self
    }

    pub fn picker(mut self, picker: Arc<dyn ReplyPicker>) -> Self {
        self.picker = Some(picker);
        self
    }

    pub fn observer(mut self, observer: Arc<dyn PipelineObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    /// Number of recent turns sent as history
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.config.history_limit = limit;
        self
    }

    pub fn crisis_policy(mut self, policy: CrisisPolicy) -> Self {
        self.config.crisis_policy = policy;
        self
    }

    /// Upper bound on each store call made while handling a message
    pub fn store_timeout(mut self, timeout: Duration) -> Self {
        self.config.store_timeout = timeout;
        self
    }

    pub fn build(self) -> Result<Pipeline> {
        let store = self
            .store
            .ok_or_else(|| PipelineError::MissingComponent("conversation store".to_string()))?;
        let remote = self
            .remote
            .ok_or_else(|| PipelineError::MissingComponent("remote responder".to_string()))?;
        let picker = self.picker.unwrap_or_else(|| Arc::new(ThreadRngPicker));
        let observer = self.observer.unwrap_or_else(|| Arc::new(TracingObserver));

        Ok(Pipeline::new(
            store,
            remote,
            LocalResponder::new(picker),
            observer,
            self.config,
        ))
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
