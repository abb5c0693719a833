//! Conversation persistence port.
//!
//! The core never manages storage durability itself: it loads a conversation
//! at the start of a request, mutates the in-memory aggregate, and hands it
//! back to the store. Serialization of concurrent mutations on one id is the
//! responsibility of the layer above the tracker (see `ChatService`).

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::conversation::Conversation;
use crate::domain::foundation::{ConversationId, Timestamp, UserId};

/// Port for conversation persistence.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Loads a conversation by id.
    ///
    /// Returns `None` when no conversation exists under the id.
    async fn get(&self, id: &ConversationId) -> Result<Option<Conversation>, StoreError>;

    /// Inserts or replaces a conversation.
    async fn upsert(&self, conversation: &Conversation) -> Result<(), StoreError>;

    /// Lists conversation summaries for one owner, newest first.
    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<ConversationSummary>, StoreError>;
}

/// Lightweight listing entry for the history view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversationSummary {
    pub id: ConversationId,
    pub title: String,
    pub created_at: Timestamp,
}

/// Persistence errors. Fatal: dropping a turn silently would violate the
/// append-only invariant, so these always propagate.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing store failed.
    #[error("store error: {0}")]
    Database(String),

    /// Stored state could not be decoded into a conversation.
    #[error("stored conversation is corrupt: {0}")]
    Corrupt(String),
}
