// src/llm/provider/openai.rs
// OpenAI-compatible Chat Completions provider

use super::{GenerationRequest, LlmProvider, ProviderError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use std::time::{Duration, Instant};
use tracing::debug;

pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl OpenAiProvider {
    pub fn new(
        api_key: String,
        base_url: String,
        model: String,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::Unavailable(format!("failed to build HTTP client: {e}")))?;

        Ok(Self::with_client(client, api_key, base_url, model, timeout))
    }

    /// Use a prebuilt client. `timeout` should match the one the client enforces.
    pub fn with_client(
        client: Client,
        api_key: String,
        base_url: String,
        model: String,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            timeout,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }

    fn map_transport_error(&self, error: reqwest::Error) -> ProviderError {
        if error.is_timeout() {
            ProviderError::Timeout(self.timeout)
        } else {
            ProviderError::Network(error.to_string())
        }
    }
}

fn map_status_error(status: StatusCode, body: String) -> ProviderError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProviderError::Auth(body),
        StatusCode::TOO_MANY_REQUESTS => ProviderError::Quota(body),
        _ => ProviderError::Api {
            status: status.as_u16(),
            body,
        },
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn generate(&self, request: GenerationRequest) -> Result<String, ProviderError> {
        let start = Instant::now();

        let mut messages = vec![json!({
            "role": "system",
            "content": request.system_prompt
        })];

        for msg in &request.history {
            messages.push(json!({
                "role": msg.role,
                "content": msg.content
            }));
        }

        messages.push(json!({
            "role": "user",
            "content": request.user_text
        }));

        let body = json!({
            "model": self.model,
            "messages": messages,
            "max_tokens": request.max_tokens,
        });

        debug!(
            "OpenAI request: model={}, history={}, max_tokens={}",
            self.model,
            request.history.len(),
            request.max_tokens
        );

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(map_status_error(status, error_text));
        }

        let raw = response
            .json::<Value>()
            .await
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

        let content = raw["choices"][0]["message"]["content"]
            .as_str()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ProviderError::MalformedResponse("no content in OpenAI response".to_string()))?
            .to_string();

        debug!(
            "OpenAI response in {}ms (finish_reason={})",
            start.elapsed().as_millis(),
            raw["choices"][0]["finish_reason"].as_str().unwrap_or("unknown")
        );

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            map_status_error(StatusCode::UNAUTHORIZED, String::new()),
            ProviderError::Auth(_)
        ));
        assert!(matches!(
            map_status_error(StatusCode::FORBIDDEN, String::new()),
            ProviderError::Auth(_)
        ));
        assert!(matches!(
            map_status_error(StatusCode::TOO_MANY_REQUESTS, String::new()),
            ProviderError::Quota(_)
        ));
        assert!(matches!(
            map_status_error(StatusCode::BAD_GATEWAY, String::new()),
            ProviderError::Api { status: 502, .. }
        ));
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let provider = OpenAiProvider::new(
            "sk-test".to_string(),
            "http://localhost:9999/".to_string(),
            "gpt-4o".to_string(),
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(provider.endpoint(), "http://localhost:9999/v1/chat/completions");
    }
}
