//! Text-generation adapters.

mod mock_generator;
mod openai_generator;

pub use mock_generator::{MockTextGenerator, RecordedCall};
pub use openai_generator::{OpenAiGenerator, OpenAiGeneratorConfig};
