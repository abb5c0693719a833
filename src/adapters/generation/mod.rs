//! Remote generation adapters.

mod mock;
mod openai_compatible;

pub use mock::MockGenerationProvider;
pub use openai_compatible::{ChatCompletionsConfig, ChatCompletionsProvider};
