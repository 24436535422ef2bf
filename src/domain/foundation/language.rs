//! Interview language and audience value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{DomainError, ErrorCode};

/// Languages the interview engine can conduct conversations in.
///
/// Parsing is strict: an unsupported code is rejected before any model
/// call is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Spanish.
    Es,
    /// English.
    En,
    /// Portuguese.
    Pt,
}

impl Language {
    /// ISO 639-1 code for this language.
    pub fn code(&self) -> &'static str {
        match self {
            Language::Es => "es",
            Language::En => "en",
            Language::Pt => "pt",
        }
    }

    /// Human-readable name, used inside prompts.
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::Es => "Spanish",
            Language::En => "English",
            Language::Pt => "Portuguese",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Language {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "es" | "es-mx" | "es-es" => Ok(Language::Es),
            "en" | "en-us" | "en-gb" => Ok(Language::En),
            "pt" | "pt-br" | "pt-pt" => Ok(Language::Pt),
            other => Err(DomainError::new(
                ErrorCode::InvalidLanguage,
                format!("unsupported language code: {}", other),
            )
            .with_detail("language", other)),
        }
    }
}

/// How technical the interviewee is, used to calibrate question phrasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TechnicalLevel {
    /// Plain-language questions only.
    #[default]
    NonTechnical,
    /// Some process/systems vocabulary is fine.
    Mixed,
    /// Full process-management vocabulary.
    Technical,
}

impl TechnicalLevel {
    /// Phrase injected into the system prompt describing the audience.
    pub fn prompt_hint(&self) -> &'static str {
        match self {
            TechnicalLevel::NonTechnical => {
                "Use everyday language. Avoid process-management jargon entirely."
            }
            TechnicalLevel::Mixed => {
                "Plain language first, but common process terms are acceptable."
            }
            TechnicalLevel::Technical => {
                "The interviewee is fluent in process-management vocabulary."
            }
        }
    }
}
