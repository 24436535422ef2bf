//! Conversation turns and interview state.
//!
//! An interview is an ordered, gapless sequence of turns. The state is
//! exclusively owned by whoever drives one interview; persistence after
//! each turn is delegated to an external collaborator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{EmployeeId, InterviewId, Language, OrgId, TechnicalLevel};

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    Assistant,
    User,
    System,
}

/// One message in an interview's ordered history. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: TurnRole,
    pub text: String,
    /// 1-based, strictly increasing, no gaps within one interview.
    pub sequence_number: u32,
    pub timestamp: DateTime<Utc>,
}

/// Lifecycle status of an interview. `Completed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewStatus {
    InProgress,
    Completed,
}

/// Full state of one interview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewState {
    pub interview_id: InterviewId,
    pub employee_id: EmployeeId,
    pub org_id: OrgId,
    pub language: Language,
    pub technical_level: TechnicalLevel,
    pub status: InterviewStatus,
    turns: Vec<ConversationTurn>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InterviewState {
    /// Creates a fresh, empty interview.
    pub fn new(
        employee_id: EmployeeId,
        org_id: OrgId,
        language: Language,
        technical_level: TechnicalLevel,
    ) -> Self {
        let now = Utc::now();
        Self {
            interview_id: InterviewId::new(),
            employee_id,
            org_id,
            language,
            technical_level,
            status: InterviewStatus::InProgress,
            turns: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Appends a turn with the next sequence number and returns a reference
    /// to it. Sequencing is owned here so callers cannot introduce gaps.
    pub fn append_turn(&mut self, role: TurnRole, text: impl Into<String>) -> &ConversationTurn {
        let turn = ConversationTurn {
            role,
            text: text.into(),
            sequence_number: self.turns.len() as u32 + 1,
            timestamp: Utc::now(),
        };
        self.turns.push(turn);
        self.updated_at = Utc::now();
        self.turns.last().expect("turn was just pushed")
    }

    /// All turns in order.
    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    /// Sequence number of the last turn, or 0 for an empty interview.
    pub fn last_sequence(&self) -> u32 {
        self.turns.len() as u32
    }

    /// Ordinal of the user turns so far. This — not the raw sequence
    /// number — is the `turn_number` the completion policy evaluates.
    pub fn user_turn_count(&self) -> u32 {
        self.turns
            .iter()
            .filter(|t| t.role == TurnRole::User)
            .count() as u32
    }

    /// Marks the interview completed. Terminal; there is no way back.
    pub fn mark_completed(&mut self) {
        self.status = InterviewStatus::Completed;
        self.updated_at = Utc::now();
    }

    pub fn is_completed(&self) -> bool {
        self.status == InterviewStatus::Completed
    }
}
