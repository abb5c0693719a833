//! Conversation persistence adapters.

mod memory;
mod postgres;

pub use memory::InMemoryConversationStore;
pub use postgres::PostgresConversationStore;
