// src/companion/resolver.rs
// Provider-first reply selection with deterministic fallback

use std::sync::Arc;
use tracing::{debug, warn};

use super::tables::CompanionTables;
use crate::llm::{ChatMessage, GenerationRequest, LlmProvider, ProviderError};
use crate::mood::{IntensityBand, Mood};
use crate::prompt::build_user_text;

/// Characters of the user's message quoted back in a fallback reply.
pub const ECHO_MAX_CHARS: usize = 50;

/// Where a reply is being produced.
#[derive(Debug, Clone, Copy)]
pub enum ReplyContext<'a> {
    /// One-off answer to a logged mood.
    CheckIn,
    /// A turn inside a chat session, with the session's earlier exchanges.
    Chat { history: &'a [ChatMessage] },
}

impl ReplyContext<'_> {
    pub fn is_chat(&self) -> bool {
        matches!(self, ReplyContext::Chat { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseSource {
    Provider,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub text: String,
    pub source: ResponseSource,
}

/// Token caps per context.
#[derive(Debug, Clone, Copy)]
pub struct GenerationLimits {
    pub check_in_max_tokens: u32,
    pub chat_max_tokens: u32,
}

impl Default for GenerationLimits {
    fn default() -> Self {
        Self {
            check_in_max_tokens: 200,
            chat_max_tokens: 250,
        }
    }
}

pub struct ResponseResolver {
    tables: Arc<CompanionTables>,
    provider: Option<Arc<dyn LlmProvider>>,
    limits: GenerationLimits,
}

impl ResponseResolver {
    pub fn new(tables: Arc<CompanionTables>, provider: Option<Arc<dyn LlmProvider>>) -> Self {
        Self {
            tables,
            provider,
            limits: GenerationLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: GenerationLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    pub fn provider_name(&self) -> Option<&'static str> {
        self.provider.as_ref().map(|p| p.name())
    }

    pub fn build_system_prompt(&self, mood: &str, intensity: i32) -> String {
        self.tables.prompts.build_system_prompt(mood, intensity)
    }

    /// Produces the companion's reply. Never fails and never returns an empty string.
    ///
    /// The provider is tried once if configured. Any provider error, or a blank
    /// answer, falls back to the pre-written tables.
    pub async fn resolve(
        &self,
        mood: &str,
        intensity: i32,
        message: Option<&str>,
        context: ReplyContext<'_>,
    ) -> Resolution {
        if let Some(provider) = &self.provider {
            let request = self.generation_request(mood, intensity, message, context);

            match provider.generate(request).await {
                Ok(text) if !text.trim().is_empty() => {
                    debug!("Reply generated by {} for mood={}", provider.name(), mood);
                    return Resolution {
                        text,
                        source: ResponseSource::Provider,
                    };
                }
                Ok(_) => {
                    let error = ProviderError::MalformedResponse("blank reply".to_string());
                    warn!(provider = provider.name(), kind = error.kind(), "Falling back: {}", error);
                }
                Err(error) => {
                    warn!(provider = provider.name(), kind = error.kind(), "Falling back: {}", error);
                }
            }
        }

        Resolution {
            text: self.fallback(mood, intensity, message, context),
            source: ResponseSource::Fallback,
        }
    }

    /// The reply used when no provider answer is available.
    pub fn fallback(
        &self,
        mood: &str,
        intensity: i32,
        message: Option<&str>,
        context: ReplyContext<'_>,
    ) -> String {
        let band = IntensityBand::from_intensity(intensity);
        let mut text = self
            .tables
            .fallbacks
            .select(Mood::parse(mood), band)
            .to_string();

        if let Some(message) = present(message) {
            text.push(' ');
            text.push_str(&echo_sentence(message));
        }

        if context.is_chat() {
            let starter = self.tables.starters.starter(band);
            let separator = if starter.ends_with(char::is_whitespace) { "" } else { " " };
            text = format!("{starter}{separator}{text}");
        }

        text
    }

    fn generation_request(
        &self,
        mood: &str,
        intensity: i32,
        message: Option<&str>,
        context: ReplyContext<'_>,
    ) -> GenerationRequest {
        let system_prompt = self.build_system_prompt(mood, intensity);

        match context {
            ReplyContext::CheckIn => GenerationRequest::new(
                system_prompt,
                build_user_text(mood, intensity, message),
                self.limits.check_in_max_tokens,
            ),
            ReplyContext::Chat { history } => {
                let user_text = match present(message) {
                    Some(message) => message.to_string(),
                    None => build_user_text(mood, intensity, None),
                };
                GenerationRequest::new(system_prompt, user_text, self.limits.chat_max_tokens)
                    .with_history(history.to_vec())
            }
        }
    }
}

fn present(message: Option<&str>) -> Option<&str> {
    message.filter(|m| !m.trim().is_empty())
}

/// First [`ECHO_MAX_CHARS`] characters of `message`, with `...` if it was cut.
pub fn truncate_echo(message: &str) -> String {
    if message.chars().count() > ECHO_MAX_CHARS {
        let head: String = message.chars().take(ECHO_MAX_CHARS).collect();
        format!("{head}...")
    } else {
        message.to_string()
    }
}

fn echo_sentence(message: &str) -> String {
    format!("Tu m'as confié : « {} ». Je t'écoute.", truncate_echo(message))
}
