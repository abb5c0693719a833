//! Conversation state tracking.
//!
//! The aggregate owns the ordered turn history for one dialogue and derives
//! bounded context windows and the emotional-journey summary from it.

#[allow(clippy::module_inception)]
mod conversation;
mod journey;
mod turn;

pub use conversation::Conversation;
pub use journey::summarize_emotional_journey;
pub use turn::{ConversationTurn, TurnRole};
