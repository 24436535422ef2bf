//! Mock text generator for testing.
//!
//! Configurable queue of canned responses, error injection, simulated
//! latency for timeout tests, and call tracking so tests can assert the
//! generator was (or was not) invoked.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{TextGenerationError, TextGenerator};

/// One recorded generator call.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub system_prompt: String,
    pub user_prompt: String,
}

#[derive(Debug, Clone)]
enum MockResponse {
    Success(String),
    Unavailable(String),
    Timeout(u32),
}

/// Mock implementation of the [`TextGenerator`] port.
#[derive(Debug, Clone, Default)]
pub struct MockTextGenerator {
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    delay: Duration,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockTextGenerator {
    /// Creates a new mock with no queued responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful response.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(MockResponse::Success(content.into()));
        self
    }

    /// Queues an unavailable error.
    pub fn with_error_unavailable(self, message: impl Into<String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(MockResponse::Unavailable(message.into()));
        self
    }

    /// Queues a transport-level timeout error.
    pub fn with_error_timeout(self, timeout_secs: u32) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(MockResponse::Timeout(timeout_secs));
        self
    }

    /// Sets simulated latency per call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Number of calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// All recorded calls in order.
    pub fn recorded_calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn next_response(&self) -> MockResponse {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| MockResponse::Success("Mock question?".to_string()))
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, TextGenerationError> {
        self.calls.lock().unwrap().push(RecordedCall {
            system_prompt: system_prompt.to_string(),
            user_prompt: user_prompt.to_string(),
        });

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_response() {
            MockResponse::Success(content) => Ok(content),
            MockResponse::Unavailable(message) => {
                Err(TextGenerationError::Unavailable { message })
            }
            MockResponse::Timeout(timeout_secs) => {
                Err(TextGenerationError::Timeout { timeout_secs })
            }
        }
    }
}
