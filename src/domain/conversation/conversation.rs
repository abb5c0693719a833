//! Conversation aggregate.
//!
//! Owns the ordered turn history for one dialogue. Turns are append-only and
//! keep strict arrival order; the aggregate never reorders or deduplicates.
//! Between requests the aggregate is persisted by the `ConversationStore`
//! collaborator, so at most one in-flight mutation per id is assumed.

use serde::{Deserialize, Serialize};

use crate::domain::emotion::EmotionLabel;
use crate::domain::foundation::{ConversationId, Timestamp, UserId};

use super::{summarize_emotional_journey, ConversationTurn};

/// Number of words kept when deriving a title from the opening message.
const TITLE_WORDS: usize = 5;

/// A conversation between one user and the assistant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    id: ConversationId,
    owner: UserId,
    title: String,
    created_at: Timestamp,
    turns: Vec<ConversationTurn>,
}

impl Conversation {
    /// Starts a new conversation, deriving the title from the opening
    /// message.
    pub fn start(owner: UserId, opening_message: &str) -> Self {
        Self {
            id: ConversationId::new(),
            owner,
            title: derive_title(opening_message),
            created_at: Timestamp::now(),
            turns: Vec::new(),
        }
    }

    /// Rehydrates a conversation from persisted state.
    ///
    /// The history is taken as-is: stores may hold histories written by
    /// older collaborators, and the aggregate treats them as read-only input
    /// except for append.
    pub fn from_parts(
        id: ConversationId,
        owner: UserId,
        title: String,
        created_at: Timestamp,
        turns: Vec<ConversationTurn>,
    ) -> Self {
        Self {
            id,
            owner,
            title,
            created_at,
            turns,
        }
    }

    pub fn id(&self) -> ConversationId {
        self.id
    }

    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Full turn history in arrival order.
    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    /// Returns true if the given user owns this conversation.
    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.owner == user
    }

    /// Appends a user turn with its detected emotion.
    pub fn append_user_turn(&mut self, content: impl Into<String>, emotion: EmotionLabel) {
        self.turns.push(ConversationTurn::user(content, emotion));
    }

    /// Appends an assistant turn.
    pub fn append_assistant_turn(&mut self, content: impl Into<String>) {
        self.turns.push(ConversationTurn::assistant(content));
    }

    /// The last `n` turns in original order.
    ///
    /// Window size is caller-supplied: the interactive loop uses a short
    /// window, the service endpoint a longer one. Returns all turns when the
    /// history is shorter than `n`.
    pub fn context_window(&self, n: usize) -> &[ConversationTurn] {
        let start = self.turns.len().saturating_sub(n);
        &self.turns[start..]
    }

    /// Natural-language summary of the user's emotional trajectory.
    pub fn emotional_journey(&self) -> String {
        summarize_emotional_journey(&self.turns)
    }
}

/// Derives a short title from the first user message.
fn derive_title(message: &str) -> String {
    let words: Vec<&str> = message.split_whitespace().collect();
    let mut title = words[..words.len().min(TITLE_WORDS)].join(" ");
    if words.len() > TITLE_WORDS {
        title.push_str("...");
    }
    title
}
