pub mod offline;
pub mod openai;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

pub use offline::OfflineClient;
pub use openai::OpenAiClient;

/// Sampling temperature used when the configuration does not override it
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// One chat-completion call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl ChatRequest {
    /// A single user-turn request
    pub fn single(model: impl Into<String>, prompt: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            model: model.into(),
            messages: vec![ChatMessage::user(prompt)],
            max_tokens,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Content of the final message, or empty if there is none
    pub fn last_content(&self) -> &str {
        self.messages.last().map(|m| m.content.as_str()).unwrap_or("")
    }
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("failed to parse response: {0}")]
    Parse(String),
}

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn chat(&self, request: &ChatRequest) -> Result<String, GatewayError>;
}

/// Picks the live client when a credential was supplied, the offline one otherwise
pub fn client_for_key(api_key: Option<String>, api_base: &str) -> Arc<dyn LlmClient> {
    match api_key.filter(|k| !k.trim().is_empty()) {
        Some(key) => {
            log::info!("Using live chat model at {}", api_base);
            Arc::new(OpenAiClient::new(key.trim()).with_base_url(api_base))
        }
        None => {
            log::info!("No API key given, using offline responses");
            Arc::new(OfflineClient::new())
        }
    }
}
