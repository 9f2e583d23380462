// Configuration layer for provider client creation

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Placeholder shipped in sample `.env` files; treated as "no key"
pub const PLACEHOLDER_API_KEY: &str = "YOUR_API_KEY_HERE";

/// Type of LLM provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    #[default]
    Gemini,
}

/// Configuration for the Gemini provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    pub api_key: String,
    /// Base URL (optional, defaults to https://generativelanguage.googleapis.com/v1beta)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Per-request HTTP timeout in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: None,
            timeout_ms: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    pub fn provider_type(&self) -> ProviderType {
        ProviderType::Gemini
    }
}

/// True when `key` is present, non-blank and not the sample placeholder
pub fn is_usable_api_key(key: Option<&str>) -> bool {
    match key.map(str::trim) {
        Some(k) => !k.is_empty() && k != PLACEHOLDER_API_KEY,
        None => false,
    }
}

/// Factory for creating chat clients from configuration
pub struct ClientFactory;

impl ClientFactory {
    /// Create a chat client from provider configuration
    pub fn create_chat_client(config: GeminiConfig) -> Result<Arc<dyn crate::traits::ChatClient>> {
        if !is_usable_api_key(Some(&config.api_key)) {
            bail!("Gemini API key is missing");
        }
        let client = crate::gemini::GeminiClient::with_options(
            config.api_key,
            config.base_url,
            config.timeout_ms.map(Duration::from_millis),
        )?;
        Ok(Arc::new(client))
    }
}
