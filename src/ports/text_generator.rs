//! Text Generator Port - interface to the generative text capability.
//!
//! The core makes exactly two kinds of calls through this port: question
//! generation (allowed to block the turn, failure is fatal for that turn)
//! and semantic matching (wrapped in a cancellable timeout by the caller,
//! failure degrades to a fail-safe verdict).

use async_trait::async_trait;

/// Port for generating text from a system and user prompt pair.
///
/// Implementations connect to an external model API and translate between
/// its wire format and plain strings. Retry policy, if any, lives in the
/// implementation, never in the core.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generates a single completion.
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, TextGenerationError>;
}

/// Text generation errors.
#[derive(Debug, thiserror::Error)]
pub enum TextGenerationError {
    /// Rate limited by the provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u32 },

    /// Provider is unavailable.
    #[error("provider unavailable: {message}")]
    Unavailable { message: String },

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Network error during the request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse the provider response envelope.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid request configuration.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Request timed out at the transport level.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u32 },
}

impl TextGenerationError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}
