//! Turn Store Port - write side for persisted conversation turns.

use async_trait::async_trait;

use crate::domain::foundation::InterviewId;
use crate::domain::interview::ConversationTurn;

/// Port for persisting turns after each exchange.
///
/// The core never reads turns back through this port; replay belongs to
/// the persistence collaborator.
#[async_trait]
pub trait TurnStore: Send + Sync {
    /// Persists one turn.
    async fn save_turn(
        &self,
        interview_id: InterviewId,
        turn: &ConversationTurn,
    ) -> Result<(), TurnStoreError>;
}

/// Turn store errors.
#[derive(Debug, thiserror::Error)]
pub enum TurnStoreError {
    #[error("turn store unavailable: {0}")]
    Unavailable(String),

    #[error("turn write failed: {0}")]
    Write(String),
}
