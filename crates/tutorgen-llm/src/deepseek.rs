//! DeepSeek HTTP backend
//!
//! Talks to DeepSeek's OpenAI-compatible chat completions endpoint. The
//! backend holds a single reqwest client for the whole run; each call gets a
//! per-request timeout from the configuration.

use crate::error::LlmError;
use crate::types::{CompletionRequest, Message};
use crate::LlmBackend;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;
use tutorgen_config::Config;

/// DeepSeek chat completions backend.
pub struct DeepSeekBackend {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    timeout: Duration,
}

impl DeepSeekBackend {
    /// Create a backend with explicit settings.
    ///
    /// # Errors
    ///
    /// Returns `LlmError::Misconfiguration` if the HTTP client cannot be
    /// constructed.
    pub fn new(
        api_key: String,
        base_url: String,
        model: String,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| LlmError::Misconfiguration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            api_key,
            model,
            timeout,
        })
    }

    /// Create a backend from configuration, reading the API key from the
    /// environment variable named in `config.llm.api_key_env`.
    ///
    /// # Errors
    ///
    /// Returns `LlmError::Misconfiguration` if the environment variable is
    /// unset or the HTTP client cannot be constructed.
    pub fn new_from_config(config: &Config) -> Result<Self, LlmError> {
        let api_key = std::env::var(&config.llm.api_key_env).map_err(|_| {
            LlmError::Misconfiguration(format!(
                "API key not found in environment variable '{}'. \
                 Set this variable or configure a different api_key_env in [llm].",
                config.llm.api_key_env
            ))
        })?;

        Self::new(
            api_key,
            config.llm.base_url.clone(),
            config.llm.model.clone(),
            Duration::from_secs(config.llm.timeout_secs),
        )
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl LlmBackend for DeepSeekBackend {
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
        debug!(
            provider = "deepseek",
            model = %self.model,
            max_tokens = request.max_tokens,
            temperature = request.temperature,
            timeout_secs = self.timeout.as_secs(),
            "Sending chat completion request"
        );

        let body = ChatRequest {
            model: self.model.clone(),
            messages: request.messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout(self.timeout.as_secs())
                } else {
                    LlmError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LlmError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::MalformedResponse(e.to_string()))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| LlmError::MalformedResponse("response contained no choices".into()))?;

        debug!(provider = "deepseek", chars = content.len(), "Completion received");

        Ok(content.trim().to_string())
    }
}

/// OpenAI-compatible chat request body.
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    max_tokens: u32,
    temperature: f32,
}

/// OpenAI-compatible chat response body. Fields we never read are omitted;
/// serde ignores them on deserialization.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_double_slash() {
        let backend = DeepSeekBackend::new(
            "key".into(),
            "https://api.deepseek.com/v1/".into(),
            "deepseek-coder".into(),
            Duration::from_secs(30),
        )
        .unwrap();

        assert_eq!(
            backend.endpoint(),
            "https://api.deepseek.com/v1/chat/completions"
        );
    }

    #[test]
    fn new_from_config_requires_api_key_env() {
        let env_var = "TUTORGEN_TEST_MISSING_KEY";
        std::env::remove_var(env_var);

        let mut config = Config::minimal_for_testing();
        config.llm.api_key_env = env_var.to_string();

        let result = DeepSeekBackend::new_from_config(&config);

        match result {
            Err(LlmError::Misconfiguration(msg)) => {
                assert!(msg.contains(env_var), "error should name the env var: {msg}");
            }
            _ => panic!("expected Misconfiguration for missing API key"),
        }
    }

    #[test]
    fn new_from_config_reads_key_from_env() {
        let env_var = "TUTORGEN_TEST_PRESENT_KEY";
        std::env::set_var(env_var, "sk-test");

        let mut config = Config::minimal_for_testing();
        config.llm.api_key_env = env_var.to_string();

        let backend = DeepSeekBackend::new_from_config(&config).unwrap();
        assert_eq!(backend.model, "deepseek-coder");
        assert_eq!(backend.api_key, "sk-test");

        std::env::remove_var(env_var);
    }

    #[test]
    fn chat_response_parses_expected_shape() {
        let json = r#"{
            "id": "cmpl-1",
            "object": "chat.completion",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "hello"}, "finish_reason": "stop"}
            ],
            "usage": {"prompt_tokens": 10, "completion_tokens": 2, "total_tokens": 12}
        }"#;

        let parsed: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.choices[0].message.content, "hello");
    }
}
