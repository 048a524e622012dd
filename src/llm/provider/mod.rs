// src/llm/provider/mod.rs
// LLM provider trait and the error surface the resolver falls back on

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

pub mod openai;

/// Message format for all providers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user".to_string(), content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: "assistant".to_string(), content: content.into() }
    }
}

/// One generation call: system instruction, optional prior turns, then the user text.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub system_prompt: String,
    pub history: Vec<ChatMessage>,
    pub user_text: String,
    pub max_tokens: u32,
}

impl GenerationRequest {
    pub fn new(system_prompt: impl Into<String>, user_text: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            history: Vec::new(),
            user_text: user_text.into(),
            max_tokens,
        }
    }

    pub fn with_history(mut self, history: Vec<ChatMessage>) -> Self {
        self.history = history;
        self
    }
}

/// Every way a provider call can fail. None of these reach API clients.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("authentication rejected: {0}")]
    Auth(String),

    #[error("quota exceeded: {0}")]
    Quota(String),

    #[error("provider returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("provider unavailable: {0}")]
    Unavailable(String),
}

impl ProviderError {
    /// Short label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::Network(_) => "network",
            ProviderError::Timeout(_) => "timeout",
            ProviderError::Auth(_) => "auth",
            ProviderError::Quota(_) => "quota",
            ProviderError::Api { .. } => "api",
            ProviderError::MalformedResponse(_) => "malformed_response",
            ProviderError::Unavailable(_) => "unavailable",
        }
    }
}

/// Text generation capability behind the companion.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider name for logging/debugging
    fn name(&self) -> &'static str;

    /// Single attempt, no retries. Returns the trimmed model text.
    async fn generate(&self, request: GenerationRequest) -> Result<String, ProviderError>;
}
