//! Completion policy for the interview state machine.
//!
//! Several termination signals can fire on the same turn; the policy
//! resolves them in a fixed precedence order so the outcome is always
//! deterministic:
//!
//! 1. hard turn limit (safety limit in dynamic mode, `max_questions` in
//!    legacy mode)
//! 2. explicit closing phrase in the user's answer
//! 3. closing signal in the freshly generated question
//!
//! Legacy mode additionally enforces a floor: below `min_questions` the
//! interview never closes, whatever the text looks like.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Language;

/// Why an interview ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionReason {
    UserRequested,
    AgentSignaled,
    SafetyLimit,
    MaxQuestions,
}

/// Outcome of one policy evaluation. Derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionDecision {
    pub is_final: bool,
    pub reason: Option<CompletionReason>,
}

impl CompletionDecision {
    fn not_final() -> Self {
        Self {
            is_final: false,
            reason: None,
        }
    }

    fn final_with(reason: CompletionReason) -> Self {
        Self {
            is_final: true,
            reason: Some(reason),
        }
    }
}

/// Which rule set governs termination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CompletionMode {
    /// The model's own judgment governs continuation; only the safety
    /// limit bounds the interview. No minimum turn count.
    #[default]
    Dynamic,
    /// Fixed question budget with a minimum floor.
    Legacy,
}

/// Configured completion policy.
#[derive(Debug, Clone)]
pub struct CompletionPolicy {
    pub mode: CompletionMode,
    /// Hard upper bound in dynamic mode.
    pub max_questions_safety_limit: u32,
    /// Upper bound in legacy mode.
    pub max_questions: u32,
    /// Floor in legacy mode: below this the interview never closes.
    pub min_questions: u32,
}

impl Default for CompletionPolicy {
    fn default() -> Self {
        Self {
            mode: CompletionMode::Dynamic,
            max_questions_safety_limit: 30,
            max_questions: 15,
            min_questions: 5,
        }
    }
}

impl CompletionPolicy {
    /// Evaluates the policy for one turn.
    ///
    /// `turn_number` is the user-turn ordinal, `user_text` the answer just
    /// received, and `generated_question` the question the model produced
    /// for this turn (checked for agent-side closing signals).
    pub fn evaluate(
        &self,
        turn_number: u32,
        user_text: &str,
        generated_question: &str,
        language: Language,
    ) -> CompletionDecision {
        match self.mode {
            CompletionMode::Dynamic => {
                if turn_number >= self.max_questions_safety_limit {
                    return CompletionDecision::final_with(CompletionReason::SafetyLimit);
                }
                self.evaluate_text_signals(user_text, generated_question, language)
            }
            CompletionMode::Legacy => {
                // The floor beats everything, including the cap.
                if turn_number < self.min_questions {
                    return CompletionDecision::not_final();
                }
                if turn_number >= self.max_questions {
                    return CompletionDecision::final_with(CompletionReason::MaxQuestions);
                }
                self.evaluate_text_signals(user_text, generated_question, language)
            }
        }
    }

    fn evaluate_text_signals(
        &self,
        user_text: &str,
        generated_question: &str,
        language: Language,
    ) -> CompletionDecision {
        let user_lower = user_text.to_lowercase();
        if closing_phrases(language)
            .iter()
            .any(|p| user_lower.contains(p))
        {
            return CompletionDecision::final_with(CompletionReason::UserRequested);
        }

        let question_lower = generated_question.to_lowercase();
        if closing_signals(language)
            .iter()
            .any(|p| question_lower.contains(p))
        {
            return CompletionDecision::final_with(CompletionReason::AgentSignaled);
        }

        CompletionDecision::not_final()
    }
}

/// Phrases an interviewee uses to ask for the interview to end.
pub fn closing_phrases(language: Language) -> &'static [&'static str] {
    match language {
        Language::Es => &[
            "quiero terminar",
            "ya está",
            "ya esta",
            "eso es todo",
            "terminemos",
            "no tengo más que agregar",
        ],
        Language::En => &[
            "let's finish",
            "i'm done",
            "that's all",
            "we can stop",
            "nothing else to add",
        ],
        Language::Pt => &[
            "vamos terminar",
            "é isso",
            "e isso",
            "isso é tudo",
            "podemos parar",
        ],
    }
}

/// Signals in a generated question indicating the model is wrapping up.
pub fn closing_signals(language: Language) -> &'static [&'static str] {
    match language {
        Language::Es => &[
            "gracias por tu tiempo",
            "ha sido registrada",
            "hemos terminado la entrevista",
            "damos por concluida",
        ],
        Language::En => &[
            "has been recorded",
            "thank you for your time",
            "concludes our interview",
            "we are done for today",
        ],
        Language::Pt => &[
            "obrigado pelo seu tempo",
            "foi registrada",
            "concluímos a entrevista",
            "encerramos por aqui",
        ],
    }
}
