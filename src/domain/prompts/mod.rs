//! Prompt assembly for the interview engine.
//!
//! Deterministic, language-selected template building. No model calls, no
//! branching beyond the documented section rules: fixed section order,
//! explicit fallbacks for an empty catalog and a first interview, and the
//! match-disclosure clause always appended last.

mod templates;

pub use templates::{closing_message, interviewer_instructions};

use crate::domain::foundation::{Language, TechnicalLevel};
use crate::domain::interview::{ConversationTurn, TurnRole};
use crate::ports::{InterviewContextSnapshot, MAX_RECENT_TOPICS};

/// How much context the assembler has to work with, resolved once at
/// entry instead of re-checked ad hoc.
#[derive(Debug, Clone)]
pub enum PromptMode {
    /// Minimal identity, no snapshot.
    Legacy {
        employee_name: String,
        role_name: String,
        organization: String,
    },
    /// Full context snapshot from the context provider.
    ContextAware { snapshot: InterviewContextSnapshot },
}

/// Disclosure about a previously-reported matched process, injected so
/// the next question probes for discrepancies between accounts.
#[derive(Debug, Clone)]
pub struct MatchDisclosure {
    pub process_name: String,
    pub reporter_name: Option<String>,
    pub reporter_role: Option<String>,
}

/// Builds the system prompt for one turn.
///
/// Section order is fixed: instructions, identity, catalog, history,
/// disclosures. Disclosures always come last.
pub fn build_system_prompt(
    mode: &PromptMode,
    language: Language,
    technical_level: TechnicalLevel,
    disclosures: &[MatchDisclosure],
) -> String {
    let mut prompt = String::new();

    prompt.push_str(interviewer_instructions(language));
    prompt.push_str("\n\n");
    prompt.push_str(technical_level.prompt_hint());
    prompt.push_str("\n\n");

    match mode {
        PromptMode::Legacy {
            employee_name,
            role_name,
            organization,
        } => {
            prompt.push_str(&format!(
                "Interviewee: {} ({}) at {}.\n",
                employee_name, role_name, organization
            ));
        }
        PromptMode::ContextAware { snapshot } => {
            prompt.push_str(&format!(
                "Interviewee: {} at {}.\n",
                snapshot.employee_name, snapshot.organization_name
            ));
            if !snapshot.role_names.is_empty() {
                prompt.push_str(&format!("Roles: {}.\n", snapshot.role_names.join(", ")));
            }

            prompt.push_str("\nKnown processes in this organization:\n");
            if snapshot.catalog.is_empty() {
                prompt.push_str("(no processes yet)\n");
            } else {
                for (i, entry) in snapshot.catalog.iter().take(20).enumerate() {
                    prompt.push_str(&format!(
                        "{}. {} ({})\n",
                        i + 1,
                        entry.name,
                        entry.type_label
                    ));
                }
            }

            prompt.push_str("\nInterview history:\n");
            if snapshot.history.total_interviews == 0 {
                prompt.push_str("This is the employee's first interview.\n");
            } else {
                prompt.push_str(&format!(
                    "{} interviews so far ({} completed).\n",
                    snapshot.history.total_interviews, snapshot.history.completed_interviews
                ));
                for topic in snapshot.history.recent_topics.iter().take(MAX_RECENT_TOPICS) {
                    prompt.push_str(&format!("- previously discussed: {}\n", topic));
                }
            }
        }
    }

    for disclosure in disclosures {
        prompt.push('\n');
        prompt.push_str(&render_disclosure(disclosure));
    }

    prompt
}

/// Renders the conversation transcript as the user-side prompt.
pub fn render_transcript(turns: &[ConversationTurn]) -> String {
    let mut out = rendered_turns(turns);
    out.push_str("Interviewer:");
    out
}

/// Renders the transcript with an answer that has not been recorded as a
/// turn yet. Lets the caller generate against the full conversation and
/// commit the answer only once generation succeeds.
pub fn render_transcript_with_pending(turns: &[ConversationTurn], pending_answer: &str) -> String {
    let mut out = rendered_turns(turns);
    out.push_str(&format!("Interviewee: {}\n", pending_answer));
    out.push_str("Interviewer:");
    out
}

fn rendered_turns(turns: &[ConversationTurn]) -> String {
    let mut out = String::new();
    for turn in turns {
        let label = match turn.role {
            TurnRole::Assistant => "Interviewer",
            TurnRole::User => "Interviewee",
            TurnRole::System => "System",
        };
        out.push_str(&format!("{}: {}\n", label, turn.text));
    }
    out
}

fn render_disclosure(disclosure: &MatchDisclosure) -> String {
    let reporter = match (&disclosure.reporter_name, &disclosure.reporter_role) {
        (Some(name), Some(role)) => format!("{} ({})", name, role),
        (Some(name), None) => name.clone(),
        _ => "another employee".to_string(),
    };
    format!(
        "The process \"{}\" was previously reported by {}. Ask whether the \
         interviewee's account agrees with or differs from that earlier \
         description.\n",
        disclosure.process_name, reporter
    )
}
