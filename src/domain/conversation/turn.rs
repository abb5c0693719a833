//! Conversation turn entity.
//!
//! Turns are immutable records of one side of an exchange. User turns carry
//! the emotion detected for the utterance; assistant turns do not.

use serde::{Deserialize, Serialize};

use crate::domain::emotion::EmotionLabel;

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    /// End-user input.
    User,
    /// Orchestrator reply.
    Assistant,
}

impl TurnRole {
    /// Normalizes upstream role spellings to the two-way scheme.
    ///
    /// Histories written by earlier collaborators use `"ai"` for assistant
    /// turns; anything unrecognized is `None` rather than a panic so a
    /// malformed history never crashes the core.
    pub fn normalize(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "user" => Some(TurnRole::User),
            "assistant" | "ai" => Some(TurnRole::Assistant),
            _ => None,
        }
    }

    /// Wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnRole::User => "user",
            TurnRole::Assistant => "assistant",
        }
    }
}

// Deserialization goes through `normalize` so histories written with the
// legacy "ai" role spelling stay readable.
impl<'de> Deserialize<'de> for TurnRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        TurnRole::normalize(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown turn role '{}'", raw)))
    }
}

impl std::fmt::Display for TurnRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An immutable turn within a conversation.
///
/// Turns are appended, never edited or removed. The `emotion` field is
/// present only on user turns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// Who produced this turn.
    pub role: TurnRole,
    /// The text of the turn.
    pub content: String,
    /// Emotion detected for a user turn.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotion: Option<EmotionLabel>,
}

impl ConversationTurn {
    /// Creates a user turn with its detected emotion.
    pub fn user(content: impl Into<String>, emotion: EmotionLabel) -> Self {
        Self {
            role: TurnRole::User,
            content: content.into(),
            emotion: Some(emotion),
        }
    }

    /// Creates an assistant turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Assistant,
            content: content.into(),
            emotion: None,
        }
    }
}
