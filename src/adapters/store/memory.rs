//! In-memory implementation of `ConversationStore`.
//!
//! Backs tests and local development. State lives for the process lifetime
//! and is shared across clones.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::domain::conversation::Conversation;
use crate::domain::foundation::{ConversationId, UserId};
use crate::ports::{ConversationStore, ConversationSummary, StoreError};

/// Process-local conversation store.
#[derive(Clone, Default)]
pub struct InMemoryConversationStore {
    inner: Arc<Mutex<HashMap<ConversationId, Conversation>>>,
}

impl InMemoryConversationStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored conversations.
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }

    /// Returns true if the store holds no conversations.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().unwrap().is_empty()
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn get(&self, id: &ConversationId) -> Result<Option<Conversation>, StoreError> {
        Ok(self.inner.lock().unwrap().get(id).cloned())
    }

    async fn upsert(&self, conversation: &Conversation) -> Result<(), StoreError> {
        self.inner
            .lock()
            .unwrap()
            .insert(conversation.id(), conversation.clone());
        Ok(())
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<ConversationSummary>, StoreError> {
        let map = self.inner.lock().unwrap();
        let mut summaries: Vec<ConversationSummary> = map
            .values()
            .filter(|c| c.is_owned_by(owner))
            .map(|c| ConversationSummary {
                id: c.id(),
                title: c.title().to_string(),
                created_at: c.created_at(),
            })
            .collect();
        summaries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(summaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::emotion::EmotionLabel;

    fn owner() -> UserId {
        UserId::new("user-1").unwrap()
    }

    #[tokio::test]
    async fn get_returns_none_for_unknown_id() {
        let store = InMemoryConversationStore::new();
        assert!(store.get(&ConversationId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn upsert_then_get_round_trips() {
        let store = InMemoryConversationStore::new();
        let mut convo = Conversation::start(owner(), "hello world");
        convo.append_user_turn("hello world", EmotionLabel::Joy);
        store.upsert(&convo).await.unwrap();

        let loaded = store.get(&convo.id()).await.unwrap().unwrap();
        assert_eq!(loaded, convo);
    }

    #[tokio::test]
    async fn upsert_replaces_existing_state() {
        let store = InMemoryConversationStore::new();
        let mut convo = Conversation::start(owner(), "hi");
        store.upsert(&convo).await.unwrap();

        convo.append_user_turn("hi", EmotionLabel::Neutral);
        store.upsert(&convo).await.unwrap();

        let loaded = store.get(&convo.id()).await.unwrap().unwrap();
        assert_eq!(loaded.turns().len(), 1);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn list_by_owner_filters_and_sorts_newest_first() {
        let store = InMemoryConversationStore::new();
        let mine_old = Conversation::start(owner(), "first chat");
        let theirs = Conversation::start(UserId::new("user-2").unwrap(), "other chat");
        store.upsert(&mine_old).await.unwrap();
        store.upsert(&theirs).await.unwrap();

        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        let mine_new = Conversation::start(owner(), "second chat");
        store.upsert(&mine_new).await.unwrap();

        let summaries = store.list_by_owner(&owner()).await.unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].id, mine_new.id());
        assert_eq!(summaries[1].id, mine_old.id());
    }
}
