//! ContinueInterview command handler.
//!
//! Resolves the prompt mode exactly once per turn: a fresh context
//! snapshot yields the context-aware mode, and a failed fetch degrades to
//! the legacy identity-only mode instead of failing the turn. Matching
//! only ever runs in context-aware mode.

use std::sync::Arc;

use thiserror::Error;
use tracing::warn;

use crate::adapters::outbound::{SideEffect, SideEffectQueue};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::interview::{CompletionReason, InterviewState, TurnController};
use crate::domain::matching::MatchVerdict;
use crate::domain::prompts::PromptMode;
use crate::ports::{ContextProvider, DirectoryCredentials};

/// Identity fields used when the context provider is unreachable.
///
/// These were known at start time; carrying them on the command lets a
/// turn proceed without any live read-side dependency.
#[derive(Debug, Clone)]
pub struct FallbackIdentity {
    pub employee_name: String,
    pub role_name: String,
    pub organization: String,
}

/// Command to process one user answer.
#[derive(Debug, Clone)]
pub struct ContinueInterviewCommand {
    pub user_text: String,
    /// Bearer token forwarded to the context provider.
    pub auth_token: String,
    /// Tenant identifier for directory lookups during provenance
    /// resolution.
    pub tenant: String,
    pub fallback_identity: FallbackIdentity,
}

/// Errors that can occur when continuing an interview.
#[derive(Debug, Clone, Error)]
pub enum ContinueInterviewError {
    /// Answer text is empty or whitespace only.
    #[error("answer text cannot be empty")]
    EmptyAnswer,

    /// The interview already reached its terminal state.
    #[error("interview is already completed")]
    InterviewCompleted,

    /// The next question could not be generated.
    #[error("question generation failed: {0}")]
    GenerationFailed(String),

    /// Any other domain failure.
    #[error("domain error: {0}")]
    Domain(String),
}

impl From<DomainError> for ContinueInterviewError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::InterviewCompleted => Self::InterviewCompleted,
            ErrorCode::GenerationFailed => Self::GenerationFailed(err.message),
            _ => Self::Domain(err.to_string()),
        }
    }
}

/// Result of processing one user answer.
#[derive(Debug)]
pub struct ContinueInterviewResult {
    pub question: String,
    pub turn_number: u32,
    pub is_final: bool,
    pub completion_reason: Option<CompletionReason>,
    pub matches: Vec<MatchVerdict>,
}

/// Handler for ContinueInterview commands.
pub struct ContinueInterviewHandler {
    context_provider: Arc<dyn ContextProvider>,
    controller: Arc<TurnController>,
    effects: SideEffectQueue,
}

impl ContinueInterviewHandler {
    pub fn new(
        context_provider: Arc<dyn ContextProvider>,
        controller: Arc<TurnController>,
        effects: SideEffectQueue,
    ) -> Self {
        Self {
            context_provider,
            controller,
            effects,
        }
    }

    pub async fn handle(
        &self,
        state: &mut InterviewState,
        cmd: ContinueInterviewCommand,
    ) -> Result<ContinueInterviewResult, ContinueInterviewError> {
        let user_text = cmd.user_text.trim();
        if user_text.is_empty() {
            return Err(ContinueInterviewError::EmptyAnswer);
        }

        let mode = self.resolve_mode(state, &cmd).await;
        let creds = DirectoryCredentials {
            tenant: cmd.tenant.clone(),
            token: cmd.auth_token.clone(),
        };

        let before = state.last_sequence();
        let outcome = self
            .controller
            .continue_interview(state, user_text, &mode, Some(&creds))
            .await?;

        // Both the user turn and the assistant turn landed on the state;
        // queue each for persistence.
        for turn in state.turns().iter().filter(|t| t.sequence_number > before) {
            self.effects.enqueue(SideEffect::SaveTurn {
                interview_id: state.interview_id,
                turn: turn.clone(),
            });
        }
        for verdict in &outcome.matches {
            if let Some(process_id) = verdict.matched_entry_id {
                self.effects.enqueue(SideEffect::SaveReference {
                    interview_id: state.interview_id,
                    process_id,
                    is_new: false,
                    confidence: verdict.confidence,
                });
            }
        }

        Ok(ContinueInterviewResult {
            question: outcome.question,
            turn_number: outcome.turn_number,
            is_final: outcome.is_final,
            completion_reason: outcome.completion_reason,
            matches: outcome.matches,
        })
    }

    /// Picks the prompt mode for this turn. Decided here, once; nothing
    /// downstream re-checks context availability.
    async fn resolve_mode(
        &self,
        state: &InterviewState,
        cmd: &ContinueInterviewCommand,
    ) -> PromptMode {
        match self
            .context_provider
            .get_context(state.employee_id, state.org_id, &cmd.auth_token)
            .await
        {
            Ok(snapshot) => PromptMode::ContextAware { snapshot },
            Err(err) => {
                warn!(
                    interview_id = %state.interview_id,
                    error = %err,
                    "context fetch failed, degrading to legacy prompt mode"
                );
                PromptMode::Legacy {
                    employee_name: cmd.fallback_identity.employee_name.clone(),
                    role_name: cmd.fallback_identity.role_name.clone(),
                    organization: cmd.fallback_identity.organization.clone(),
                }
            }
        }
    }
}
