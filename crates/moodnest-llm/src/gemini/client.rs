// Gemini-specific client implementation

use crate::gemini::GenerateContentResponse;
use crate::traits::{ChatClient, ChatOptions, ChatRequest, ChatResponse, TokenUsage};
use crate::types::{Content, Message};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde_json::{json, Value};
use std::time::Duration;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini client (HTTP direct, no SDK)
pub struct GeminiClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl GeminiClient {
    /// Create new client with API key
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_options(api_key, None, None)
    }

    /// Create a client with an optional base URL override and request timeout
    pub fn with_options(
        api_key: impl Into<String>,
        base_url: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let api_key = api_key.into();

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            API_KEY_HEADER,
            HeaderValue::from_str(&api_key).context("Invalid API key format")?,
        );

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self {
            http_client,
            base_url: base_url.unwrap_or_else(|| GEMINI_API_BASE.to_string()),
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            model
        )
    }

    /// Build generateContent request payload
    pub(crate) fn build_request(
        system_instruction: Option<&str>,
        messages: Vec<Message>,
        options: &ChatOptions,
    ) -> Result<Value> {
        let contents: Vec<Value> = messages.into_iter().map(Self::convert_message).collect();

        let mut request = json!({ "contents": contents });
        let obj = request
            .as_object_mut()
            .context("request payload is not an object")?;

        if let Some(instruction) = system_instruction {
            obj.insert(
                "system_instruction".to_string(),
                json!({ "parts": [{ "text": instruction }] }),
            );
        }
        if !options.safety_settings.is_empty() {
            obj.insert(
                "safetySettings".to_string(),
                serde_json::to_value(&options.safety_settings)?,
            );
        }

        let mut generation = serde_json::Map::new();
        if let Some(temp) = options.temperature {
            generation.insert("temperature".to_string(), json!(temp));
        }
        if let Some(max_tokens) = options.max_output_tokens {
            generation.insert("maxOutputTokens".to_string(), json!(max_tokens));
        }
        if !generation.is_empty() {
            obj.insert("generationConfig".to_string(), Value::Object(generation));
        }

        Ok(request)
    }

    /// Convert our Message type to Gemini format (assistant turns are "model")
    fn convert_message(message: Message) -> Value {
        let role = match message {
            Message::Human { .. } => "user",
            Message::AI { .. } => "model",
        };
        json!({
            "role": role,
            "parts": Self::convert_content(message.content()),
        })
    }

    fn convert_content(content: &Content) -> Vec<Value> {
        content
            .text_parts()
            .into_iter()
            .map(|text| json!({ "text": text }))
            .collect()
    }
}

#[async_trait]
impl ChatClient for GeminiClient {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        let payload = Self::build_request(
            request.system_instruction.as_deref(),
            request.messages,
            &request.options,
        )?;

        tracing::debug!(model = %request.model, "Sending Gemini generateContent request");

        let response = self
            .http_client
            .post(self.endpoint(&request.model))
            .json(&payload)
            .send()
            .await
            .context("Failed to send request")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Gemini API error ({}): {}", status, error_text);
        }

        let raw: GenerateContentResponse = response
            .json()
            .await
            .context("Failed to parse response")?;

        into_chat_response(raw)
    }
}

/// Convert the wire response into the provider-agnostic shape
pub(crate) fn into_chat_response(raw: GenerateContentResponse) -> Result<ChatResponse> {
    Ok(ChatResponse {
        content: raw.first_text(),
        finish_reason: raw.finish_reason(),
        block_reason: raw.block_reason(),
        usage: raw.usage_metadata.as_ref().map(|usage| TokenUsage {
            input_tokens: usage.prompt_token_count,
            output_tokens: usage.candidates_token_count,
            total_tokens: usage.total_token_count,
        }),
        raw: serde_json::to_value(raw)?,
    })
}
