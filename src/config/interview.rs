//! Interview policy configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::domain::interview::{CompletionMode, CompletionPolicy};

/// Interview policy configuration
#[derive(Debug, Clone, Deserialize)]
pub struct InterviewConfig {
    /// Completion evaluation mode: "dynamic" or "legacy"
    #[serde(default)]
    pub completion_mode: CompletionMode,

    /// Hard cap on user turns regardless of mode
    #[serde(default = "default_safety_limit")]
    pub max_questions_safety_limit: u32,

    /// Question cap applied in legacy mode
    #[serde(default = "default_max_questions")]
    pub max_questions: u32,

    /// Question floor applied in legacy mode
    #[serde(default = "default_min_questions")]
    pub min_questions: u32,

    /// Semantic matcher timeout in seconds
    #[serde(default = "default_matcher_timeout")]
    pub matcher_timeout_secs: u64,
}

impl InterviewConfig {
    /// Get matcher timeout as Duration
    pub fn matcher_timeout(&self) -> Duration {
        Duration::from_secs(self.matcher_timeout_secs)
    }

    /// Builds the completion policy from this configuration
    pub fn completion_policy(&self) -> CompletionPolicy {
        CompletionPolicy {
            mode: self.completion_mode,
            max_questions_safety_limit: self.max_questions_safety_limit,
            max_questions: self.max_questions,
            min_questions: self.min_questions,
        }
    }

    /// Validate interview configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.matcher_timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.max_questions_safety_limit < self.max_questions {
            return Err(ValidationError::SafetyLimitBelowCap);
        }
        if self.min_questions > self.max_questions {
            return Err(ValidationError::FloorAboveCap);
        }
        Ok(())
    }
}

impl Default for InterviewConfig {
    fn default() -> Self {
        Self {
            completion_mode: CompletionMode::default(),
            max_questions_safety_limit: default_safety_limit(),
            max_questions: default_max_questions(),
            min_questions: default_min_questions(),
            matcher_timeout_secs: default_matcher_timeout(),
        }
    }
}

fn default_safety_limit() -> u32 {
    30
}

fn default_max_questions() -> u32 {
    15
}

fn default_min_questions() -> u32 {
    5
}

fn default_matcher_timeout() -> u64 {
    4
}
