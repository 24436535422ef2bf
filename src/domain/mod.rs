//! Domain layer: foundation value objects, the interview state machine,
//! process matching, and prompt assembly.

pub mod foundation;
pub mod interview;
pub mod matching;
pub mod prompts;
