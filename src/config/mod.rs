//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Values are read with the
//! `PROCESS_COMPASS` prefix and nested values use double underscores as
//! separators.
//!
//! # Example
//!
//! ```no_run
//! use process_compass::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod error;
mod interview;

pub use ai::GenerationConfig;
pub use error::{ConfigError, ValidationError};
pub use interview::InterviewConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// Text-generation provider configuration
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Interview policy configuration
    #[serde(default)]
    pub interview: InterviewConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads a `.env` file if present, then reads environment variables
    /// with the `PROCESS_COMPASS` prefix:
    ///
    /// - `PROCESS_COMPASS__GENERATION__API_KEY=sk-...`
    /// - `PROCESS_COMPASS__INTERVIEW__COMPLETION_MODE=legacy`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into the expected
    /// types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PROCESS_COMPASS")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.generation.validate()?;
        self.interview.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global; serialize these tests.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var("PROCESS_COMPASS__GENERATION__API_KEY", "sk-test");
    }

    fn clear_env() {
        env::remove_var("PROCESS_COMPASS__GENERATION__API_KEY");
        env::remove_var("PROCESS_COMPASS__GENERATION__MODEL");
        env::remove_var("PROCESS_COMPASS__INTERVIEW__COMPLETION_MODE");
        env::remove_var("PROCESS_COMPASS__INTERVIEW__MAX_QUESTIONS");
    }

    #[test]
    fn test_load_with_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.generation.model, "gpt-4o-mini");
        assert_eq!(config.interview.max_questions, 15);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides_are_applied() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("PROCESS_COMPASS__GENERATION__MODEL", "gpt-4o");
        env::set_var("PROCESS_COMPASS__INTERVIEW__COMPLETION_MODE", "legacy");
        env::set_var("PROCESS_COMPASS__INTERVIEW__MAX_QUESTIONS", "10");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.generation.model, "gpt-4o");
        assert_eq!(config.interview.max_questions, 10);
        assert_eq!(
            config.interview.completion_mode,
            crate::domain::interview::CompletionMode::Legacy
        );
    }

    #[test]
    fn test_validation_fails_without_api_key() {
        let config = AppConfig::default();
        assert!(config.validate().is_err());
    }
}
