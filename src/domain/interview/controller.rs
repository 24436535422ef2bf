//! Turn Controller - the interview state machine.
//!
//! States: `NotStarted → InProgress → Completed`, with `Completed`
//! terminal. One controller instance is constructed per request with its
//! collaborators injected; there are no package-level singletons.
//!
//! The controller owns the order of operations for a turn: gate-then-match
//! the user's answer, assemble the prompt (with disclosure clauses for
//! provenance-bearing matches), generate the next question, evaluate the
//! completion policy, and only then record the user and assistant turns.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::domain::foundation::{DomainError, ErrorCode, Language, TechnicalLevel};
use crate::domain::interview::{
    CompletionPolicy, CompletionReason, InterviewState, TurnRole,
};
use crate::domain::matching::{mentions_process, MatchVerdict, ProcessMatcher};
use crate::domain::prompts::{
    build_system_prompt, closing_message, render_transcript, render_transcript_with_pending,
    MatchDisclosure, PromptMode,
};
use crate::ports::{DirectoryCredentials, InterviewContextSnapshot, TextGenerator};

/// Result of starting an interview.
#[derive(Debug)]
pub struct StartedInterview {
    pub state: InterviewState,
    pub question: String,
    pub turn_number: u32,
}

/// Result of processing one user turn.
#[derive(Debug)]
pub struct TurnOutcome {
    pub question: String,
    pub turn_number: u32,
    pub is_final: bool,
    pub completion_reason: Option<CompletionReason>,
    /// Positive match verdicts for this turn. Empty when the mention gate
    /// did not fire, no context was available, or nothing matched.
    pub matches: Vec<MatchVerdict>,
}

/// Top-level state machine driving one interview turn at a time.
pub struct TurnController {
    generator: Arc<dyn TextGenerator>,
    matcher: Arc<ProcessMatcher>,
    policy: CompletionPolicy,
}

impl TurnController {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        matcher: Arc<ProcessMatcher>,
        policy: CompletionPolicy,
    ) -> Self {
        Self {
            generator,
            matcher,
            policy,
        }
    }

    /// Starts an interview: builds the initial prompt, generates the first
    /// question, and emits turn 1 as the assistant.
    ///
    /// Fails with `ContextUnavailable` when no snapshot is supplied; an
    /// interview cannot start without at least a minimal identity.
    #[instrument(skip_all, fields(language = %language))]
    pub async fn start(
        &self,
        context: Option<&InterviewContextSnapshot>,
        language: Language,
        technical_level: TechnicalLevel,
    ) -> Result<StartedInterview, DomainError> {
        let snapshot = context.ok_or_else(DomainError::context_unavailable)?;

        let mut state = InterviewState::new(
            snapshot.employee_id,
            snapshot.org_id,
            language,
            technical_level,
        );

        let mode = PromptMode::ContextAware {
            snapshot: snapshot.clone(),
        };
        let system_prompt = build_system_prompt(&mode, language, technical_level, &[]);
        let transcript = render_transcript(state.turns());

        let question = self
            .generator
            .generate(&system_prompt, &transcript)
            .await
            .map_err(|err| {
                DomainError::new(ErrorCode::GenerationFailed, err.to_string())
            })?;

        state.append_turn(TurnRole::Assistant, question.clone());
        info!(interview_id = %state.interview_id, "interview started");

        Ok(StartedInterview {
            state,
            question,
            turn_number: 1,
        })
    }

    /// Processes one user answer and produces the next question.
    ///
    /// On error the state is left untouched: the answer is only recorded
    /// once generation succeeds, so the caller can retry the same answer
    /// without duplicating turns.
    #[instrument(skip_all, fields(interview_id = %state.interview_id))]
    pub async fn continue_interview(
        &self,
        state: &mut InterviewState,
        user_text: &str,
        mode: &PromptMode,
        directory_creds: Option<&DirectoryCredentials>,
    ) -> Result<TurnOutcome, DomainError> {
        if state.is_completed() {
            return Err(DomainError::new(
                ErrorCode::InterviewCompleted,
                "interview is already completed",
            ));
        }

        // The matcher is never invoked when the gate says no; this is a
        // hard invariant for cost control.
        let matches = match mode {
            PromptMode::ContextAware { snapshot } if mentions_process(user_text) => {
                let verdict = self
                    .matcher
                    .match_description(
                        user_text,
                        snapshot.catalog.clone(),
                        state.language,
                        directory_creds,
                    )
                    .await;
                if verdict.is_match {
                    vec![verdict]
                } else {
                    debug!(reasoning = %verdict.reasoning, "turn did not match a known process");
                    Vec::new()
                }
            }
            _ => Vec::new(),
        };

        let disclosures: Vec<MatchDisclosure> = matches
            .iter()
            .filter_map(|verdict| {
                let provenance = verdict.provenance.as_ref()?;
                Some(MatchDisclosure {
                    process_name: verdict
                        .matched_name
                        .clone()
                        .unwrap_or_else(|| "unknown".to_string()),
                    reporter_name: provenance.employee_name.clone(),
                    reporter_role: provenance.employee_role.clone(),
                })
            })
            .collect();

        let system_prompt =
            build_system_prompt(mode, state.language, state.technical_level, &disclosures);
        let transcript = render_transcript_with_pending(state.turns(), user_text);

        let mut question = self
            .generator
            .generate(&system_prompt, &transcript)
            .await
            .map_err(|err| DomainError::new(ErrorCode::GenerationFailed, err.to_string()))?;

        let turn_number = state.user_turn_count() + 1;
        let decision = self
            .policy
            .evaluate(turn_number, user_text, &question, state.language);

        if decision.is_final {
            // Deterministic closing text replaces the generated question.
            question = closing_message(state.language).to_string();
        }

        state.append_turn(TurnRole::User, user_text);
        state.append_turn(TurnRole::Assistant, question.clone());
        if decision.is_final {
            state.mark_completed();
            info!(
                interview_id = %state.interview_id,
                reason = ?decision.reason,
                "interview completed"
            );
        }

        Ok(TurnOutcome {
            question,
            turn_number,
            is_final: decision.is_final,
            completion_reason: decision.reason,
            matches,
        })
    }
}
