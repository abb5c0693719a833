//! Chat orchestration service.
//!
//! Runs one synchronous pipeline per user message: classify, track state,
//! generate or fall back, persist, log. Mutations on one conversation id are
//! serialized with a per-id async lock so two concurrent requests cannot
//! silently lose an appended turn; distinct ids proceed independently.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use thiserror::Error;

use crate::domain::conversation::Conversation;
use crate::domain::emotion::EmotionSample;
use crate::domain::foundation::{ConversationId, UserId};
use crate::ports::{
    ClassifierError, ConversationStore, ConversationSummary, StoreError, TranscriptEntry,
    TranscriptSink,
};

use super::{EmotionDetector, ResponseGenerator};

/// Turns of context handed to the generator by the service endpoint.
const SERVICE_CONTEXT_TURNS: usize = 10;

/// Input for one orchestration cycle.
#[derive(Debug, Clone)]
pub struct ChatInput {
    /// The raw user utterance.
    pub user_message: String,
    /// Existing conversation to continue, or `None` to start a new one.
    pub conversation_id: Option<ConversationId>,
}

/// Result of one orchestration cycle.
#[derive(Debug, Clone)]
pub struct ChatOutcome {
    pub response_text: String,
    pub conversation_id: ConversationId,
    pub detected_emotion: EmotionSample,
}

/// Errors that reach the caller of the chat pipeline.
///
/// Generation failures never appear here: they are masked by the template
/// fallback inside [`ResponseGenerator`].
#[derive(Debug, Error)]
pub enum ChatError {
    /// Classification failed; no safe emotion can be inferred, so the
    /// request fails without committing a turn.
    #[error("classification failed: {0}")]
    Classification(#[from] ClassifierError),

    /// The requested conversation id does not exist.
    #[error("conversation {0} not found")]
    NotFound(ConversationId),

    /// The conversation exists but belongs to a different owner. Kept
    /// distinct from `NotFound` so callers can flatten or sharpen the
    /// difference themselves.
    #[error("conversation {0} is not owned by the requesting user")]
    NotOwned(ConversationId),

    /// Persistence failed; dropping the turn silently would violate the
    /// append-only invariant.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Per-conversation-id async locks.
///
/// The store collaborator is not required to serialize same-id writes, so
/// the service does it here for the in-process case. Entries are evicted in
/// `release` once no task holds or awaits the id's lock, so the map only
/// holds ids with in-flight cycles.
#[derive(Default)]
struct ConversationLocks {
    inner: Mutex<HashMap<ConversationId, Arc<tokio::sync::Mutex<()>>>>,
}

impl ConversationLocks {
    async fn acquire(&self, id: ConversationId) -> tokio::sync::OwnedMutexGuard<()> {
        let lock = {
            let mut map = self.inner.lock().expect("lock map is never poisoned");
            Arc::clone(map.entry(id).or_default())
        };
        lock.lock_owned().await
    }

    /// Evicts the id's entry unless another task still references its lock.
    ///
    /// Holders and waiters each own an `Arc` clone, so a strong count above
    /// the map's own reference means the entry is still in use.
    fn release(&self, id: &ConversationId) {
        let mut map = self.inner.lock().expect("lock map is never poisoned");
        if map.get(id).is_some_and(|lock| Arc::strong_count(lock) == 1) {
            map.remove(id);
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.inner.lock().expect("lock map is never poisoned").len()
    }
}

/// Top-level coordinator for the classify → track → respond pipeline.
pub struct ChatService {
    detector: EmotionDetector,
    responder: ResponseGenerator,
    store: Arc<dyn ConversationStore>,
    transcript: Option<Arc<dyn TranscriptSink>>,
    locks: ConversationLocks,
    context_turns: usize,
}

impl ChatService {
    /// Creates the service over its collaborators.
    pub fn new(
        detector: EmotionDetector,
        responder: ResponseGenerator,
        store: Arc<dyn ConversationStore>,
    ) -> Self {
        Self {
            detector,
            responder,
            store,
            transcript: None,
            locks: ConversationLocks::default(),
            context_turns: SERVICE_CONTEXT_TURNS,
        }
    }

    /// Attaches the append-only transcript sink.
    pub fn with_transcript(mut self, transcript: Arc<dyn TranscriptSink>) -> Self {
        self.transcript = Some(transcript);
        self
    }

    /// Overrides the context window size (the interactive loop uses a
    /// shorter window than the service endpoint).
    pub fn with_context_turns(mut self, turns: usize) -> Self {
        self.context_turns = turns;
        self
    }

    /// Runs one orchestration cycle for the given user.
    pub async fn chat(&self, user: &UserId, input: ChatInput) -> Result<ChatOutcome, ChatError> {
        // Classify before taking the lock or mutating anything: a
        // classification failure must not commit a partial turn.
        let emotion = self.detector.detect(&input.user_message).await?;

        match input.conversation_id {
            Some(id) => {
                let guard = self.locks.acquire(id).await;
                let result = match self.load_owned(user, &id).await {
                    Ok(conversation) => {
                        self.run_cycle(conversation, &input.user_message, emotion)
                            .await
                    }
                    Err(err) => Err(err),
                };
                drop(guard);
                self.locks.release(&id);
                result
            }
            None => {
                // Fresh id: no contention is possible before the first
                // upsert, but taking the lock keeps the path uniform.
                let conversation = Conversation::start(user.clone(), &input.user_message);
                let id = conversation.id();
                let guard = self.locks.acquire(id).await;
                let result = self
                    .run_cycle(conversation, &input.user_message, emotion)
                    .await;
                drop(guard);
                self.locks.release(&id);
                result
            }
        }
    }

    /// Lists the user's conversations, newest first.
    pub async fn history(&self, user: &UserId) -> Result<Vec<ConversationSummary>, ChatError> {
        Ok(self.store.list_by_owner(user).await?)
    }

    /// Fetches one full conversation, enforcing ownership.
    pub async fn conversation(
        &self,
        user: &UserId,
        id: &ConversationId,
    ) -> Result<Conversation, ChatError> {
        self.load_owned(user, id).await
    }

    async fn load_owned(
        &self,
        user: &UserId,
        id: &ConversationId,
    ) -> Result<Conversation, ChatError> {
        let conversation = self
            .store
            .get(id)
            .await?
            .ok_or(ChatError::NotFound(*id))?;
        if !conversation.is_owned_by(user) {
            return Err(ChatError::NotOwned(*id));
        }
        Ok(conversation)
    }

    async fn run_cycle(
        &self,
        mut conversation: Conversation,
        user_message: &str,
        emotion: EmotionSample,
    ) -> Result<ChatOutcome, ChatError> {
        conversation.append_user_turn(user_message, emotion.label());

        let summary = conversation.emotional_journey();
        let window = conversation.context_window(self.context_turns).to_vec();

        let response_text = self
            .responder
            .generate(emotion.label(), user_message, &window, &summary)
            .await;

        conversation.append_assistant_turn(&response_text);
        self.store.upsert(&conversation).await?;

        tracing::info!(
            conversation_id = %conversation.id(),
            emotion = %emotion.label(),
            confidence = emotion.confidence(),
            "orchestration cycle completed"
        );

        if let Some(sink) = &self.transcript {
            let entry = TranscriptEntry::now(user_message, emotion, &response_text);
            if let Err(err) = sink.append(&entry).await {
                tracing::warn!(error = %err, "transcript append failed");
            }
        }

        Ok(ChatOutcome {
            response_text,
            conversation_id: conversation.id(),
            detected_emotion: emotion,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::adapters::classifier::MockClassifier;
    use crate::adapters::generation::MockGenerationProvider;
    use crate::adapters::store::InMemoryConversationStore;

    fn service() -> ChatService {
        ChatService::new(
            EmotionDetector::new(Arc::new(MockClassifier::new())),
            ResponseGenerator::template_only()
                .with_provider(Arc::new(MockGenerationProvider::new()))
                .with_rng_seed(7),
            Arc::new(InMemoryConversationStore::new()),
        )
    }

    fn owner() -> UserId {
        UserId::new("someone").unwrap()
    }

    #[tokio::test]
    async fn release_retains_entry_while_lock_is_held() {
        let locks = ConversationLocks::default();
        let id = ConversationId::new();

        let guard = locks.acquire(id).await;
        locks.release(&id);
        assert_eq!(locks.len(), 1);

        drop(guard);
        locks.release(&id);
        assert_eq!(locks.len(), 0);
    }

    #[tokio::test]
    async fn completed_cycles_leave_no_lock_entries() {
        let service = service();

        let first = service
            .chat(
                &owner(),
                ChatInput {
                    user_message: "opening".to_string(),
                    conversation_id: None,
                },
            )
            .await
            .unwrap();
        service
            .chat(
                &owner(),
                ChatInput {
                    user_message: "again".to_string(),
                    conversation_id: Some(first.conversation_id),
                },
            )
            .await
            .unwrap();

        assert_eq!(service.locks.len(), 0);
    }

    #[tokio::test]
    async fn failed_lookups_leave_no_lock_entries() {
        let service = service();

        let result = service
            .chat(
                &owner(),
                ChatInput {
                    user_message: "hello".to_string(),
                    conversation_id: Some(ConversationId::new()),
                },
            )
            .await;

        assert!(matches!(result, Err(ChatError::NotFound(_))));
        assert_eq!(service.locks.len(), 0);
    }
}
