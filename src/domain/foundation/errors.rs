//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    InvalidLanguage,
    EmptyField,

    // Precondition errors
    ContextUnavailable,
    InterviewCompleted,

    // Not found errors
    InterviewNotFound,
    EmployeeNotFound,

    // Collaborator errors
    GenerationFailed,
    DirectoryError,
    StorageError,

    // Infrastructure errors
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::InvalidLanguage => "INVALID_LANGUAGE",
            ErrorCode::EmptyField => "EMPTY_FIELD",
            ErrorCode::ContextUnavailable => "CONTEXT_UNAVAILABLE",
            ErrorCode::InterviewCompleted => "INTERVIEW_COMPLETED",
            ErrorCode::InterviewNotFound => "INTERVIEW_NOT_FOUND",
            ErrorCode::EmployeeNotFound => "EMPLOYEE_NOT_FOUND",
            ErrorCode::GenerationFailed => "GENERATION_FAILED",
            ErrorCode::DirectoryError => "DIRECTORY_ERROR",
            ErrorCode::StorageError => "STORAGE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates the fatal error for starting an interview without context.
    pub fn context_unavailable() -> Self {
        Self::new(
            ErrorCode::ContextUnavailable,
            "interview cannot start without a context snapshot",
        )
    }

    /// Creates a validation error for a specific field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::ValidationFailed,
            message: message.into(),
            details: HashMap::new(),
        }
        .with_detail("field", field.into())
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::InterviewNotFound, "interview not found");
        assert_eq!(format!("{}", err), "[INTERVIEW_NOT_FOUND] interview not found");
    }

    #[test]
    fn context_unavailable_has_expected_code() {
        let err = DomainError::context_unavailable();
        assert_eq!(err.code, ErrorCode::ContextUnavailable);
    }

    #[test]
    fn domain_error_with_detail_adds_detail() {
        let err = DomainError::validation("language", "unsupported code")
            .with_detail("value", "xx");

        assert_eq!(err.details.get("field"), Some(&"language".to_string()));
        assert_eq!(err.details.get("value"), Some(&"xx".to_string()));
    }

    #[test]
    fn error_code_display_formats_correctly() {
        assert_eq!(format!("{}", ErrorCode::ContextUnavailable), "CONTEXT_UNAVAILABLE");
        assert_eq!(format!("{}", ErrorCode::GenerationFailed), "GENERATION_FAILED");
    }
}
