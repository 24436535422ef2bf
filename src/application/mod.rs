//! Application layer - command handlers.
//!
//! One handler per operation, each constructed with its collaborators and
//! a sending handle on the outbound side-effect queue.

mod continue_interview;
mod start_interview;

pub use continue_interview::{
    ContinueInterviewCommand, ContinueInterviewError, ContinueInterviewHandler,
    ContinueInterviewResult, FallbackIdentity,
};
pub use start_interview::{
    StartInterviewCommand, StartInterviewError, StartInterviewHandler, StartInterviewResult,
};
