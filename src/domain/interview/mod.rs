//! Interview state machine: turns, completion policy, turn controller.

mod completion;
mod controller;
mod turn;

pub use completion::{
    closing_phrases, closing_signals, CompletionDecision, CompletionMode, CompletionPolicy,
    CompletionReason,
};
pub use controller::{StartedInterview, TurnController, TurnOutcome};
pub use turn::{ConversationTurn, InterviewState, InterviewStatus, TurnRole};
