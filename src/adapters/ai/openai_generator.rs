//! OpenAI-compatible text generator adapter.
//!
//! Implements the [`TextGenerator`] port against any chat-completions
//! endpoint speaking the OpenAI wire format. Non-streaming only; the core
//! consumes whole completions.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::ports::{TextGenerationError, TextGenerator};

/// Configuration for the OpenAI-compatible generator.
#[derive(Debug, Clone)]
pub struct OpenAiGeneratorConfig {
    api_key: Secret<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl OpenAiGeneratorConfig {
    /// Creates a configuration with the given API key and defaults.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout: Duration::from_secs(60),
            max_tokens: 1024,
            temperature: 0.7,
        }
    }

    /// Sets the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the transport timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// OpenAI-compatible chat-completions generator.
pub struct OpenAiGenerator {
    config: OpenAiGeneratorConfig,
    client: Client,
}

impl OpenAiGenerator {
    /// Creates a new generator. Panics only if the TLS backend cannot be
    /// initialized, which is a startup-time configuration defect.
    pub fn new(config: OpenAiGeneratorConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("failed to build HTTP client");
        Self { config, client }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[async_trait]
impl TextGenerator for OpenAiGenerator {
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, TextGenerationError> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        let response = self
            .client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TextGenerationError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    TextGenerationError::network(format!("connection failed: {}", e))
                } else {
                    TextGenerationError::network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), "generation request rejected");
            return Err(match status.as_u16() {
                401 => TextGenerationError::AuthenticationFailed,
                429 => TextGenerationError::RateLimited {
                    retry_after_secs: 30,
                },
                400 => TextGenerationError::InvalidRequest(body),
                500..=599 => {
                    TextGenerationError::unavailable(format!("server error {}: {}", status, body))
                }
                _ => TextGenerationError::network(format!("unexpected status {}: {}", status, body)),
            });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| TextGenerationError::parse(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or_else(|| TextGenerationError::parse("response contained no content"))
    }
}
