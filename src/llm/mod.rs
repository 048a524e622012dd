// src/llm/mod.rs
// LLM module exports and submodule declarations

pub mod provider;

pub use provider::{ChatMessage, GenerationRequest, LlmProvider, ProviderError};
pub use provider::openai::OpenAiProvider;
