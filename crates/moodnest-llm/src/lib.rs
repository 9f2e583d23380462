pub mod config;
pub mod gemini;
pub mod traits;
pub mod types;

pub use traits::{ChatClient, ChatOptions, ChatRequest, ChatResponse, TokenUsage};

pub use config::{is_usable_api_key, ClientFactory, GeminiConfig, ProviderType, PLACEHOLDER_API_KEY};
pub use gemini::GeminiClient;
pub use types::{Content, ContentPart, HarmBlockThreshold, HarmCategory, Message, SafetySetting};
