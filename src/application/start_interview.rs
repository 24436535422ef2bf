//! StartInterview command handler.
//!
//! Fetches the interview context snapshot, starts the state machine, and
//! queues the opening turn for persistence. Context is mandatory here:
//! an interview that cannot identify its subject never starts.

use std::sync::Arc;

use thiserror::Error;
use tracing::warn;

use crate::adapters::outbound::{SideEffect, SideEffectQueue};
use crate::domain::foundation::{
    DomainError, EmployeeId, ErrorCode, InterviewId, Language, OrgId, TechnicalLevel,
};
use crate::domain::interview::{InterviewState, TurnController};
use crate::ports::ContextProvider;

/// Command to start a new interview.
#[derive(Debug, Clone)]
pub struct StartInterviewCommand {
    pub employee_id: EmployeeId,
    pub org_id: OrgId,
    /// Bearer token forwarded to the context provider.
    pub auth_token: String,
    pub language: Language,
    pub technical_level: TechnicalLevel,
}

/// Errors that can occur when starting an interview.
#[derive(Debug, Clone, Error)]
pub enum StartInterviewError {
    /// The context provider could not produce a snapshot.
    #[error("interview context unavailable: {0}")]
    ContextUnavailable(String),

    /// The first question could not be generated.
    #[error("question generation failed: {0}")]
    GenerationFailed(String),

    /// Any other domain failure.
    #[error("domain error: {0}")]
    Domain(String),
}

impl From<DomainError> for StartInterviewError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ContextUnavailable => Self::ContextUnavailable(err.message),
            ErrorCode::GenerationFailed => Self::GenerationFailed(err.message),
            _ => Self::Domain(err.to_string()),
        }
    }
}

/// Result of starting an interview.
#[derive(Debug)]
pub struct StartInterviewResult {
    pub interview_id: InterviewId,
    pub state: InterviewState,
    pub question: String,
    pub turn_number: u32,
}

/// Handler for StartInterview commands.
pub struct StartInterviewHandler {
    context_provider: Arc<dyn ContextProvider>,
    controller: Arc<TurnController>,
    effects: SideEffectQueue,
}

impl StartInterviewHandler {
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
        cmd: StartInterviewCommand,
    ) -> Result<StartInterviewResult, StartInterviewError> {
        let snapshot = self
            .context_provider
            .get_context(cmd.employee_id, cmd.org_id, &cmd.auth_token)
            .await
            .map_err(|err| {
                warn!(employee_id = %cmd.employee_id, error = %err, "context fetch failed at start");
                StartInterviewError::ContextUnavailable(err.to_string())
            })?;

        let started = self
            .controller
            .start(Some(&snapshot), cmd.language, cmd.technical_level)
            .await?;

        if let Some(turn) = started.state.turns().last() {
            self.effects.enqueue(SideEffect::SaveTurn {
                interview_id: started.state.interview_id,
                turn: turn.clone(),
            });
        }

        Ok(StartInterviewResult {
            interview_id: started.state.interview_id,
            question: started.question,
            turn_number: started.turn_number,
            state: started.state,
        })
    }
}
