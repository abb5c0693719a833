//! Application layer: the orchestration pipeline over the domain and ports.

mod chat;
mod detector;
mod responder;

pub use chat::{ChatError, ChatInput, ChatOutcome, ChatService};
pub use detector::EmotionDetector;
pub use responder::ResponseGenerator;
