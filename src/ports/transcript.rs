//! Transcript sink port.
//!
//! Conversation logging is a side-effecting external collaborator invoked
//! after a successful orchestration cycle, not core logic. Sink failures are
//! logged and swallowed by the caller.

use async_trait::async_trait;

use crate::domain::emotion::EmotionSample;
use crate::domain::foundation::Timestamp;

/// One completed orchestration cycle, ready to be appended to the log.
#[derive(Debug, Clone)]
pub struct TranscriptEntry {
    pub timestamp: Timestamp,
    pub user_message: String,
    pub emotion: EmotionSample,
    pub response: String,
}

impl TranscriptEntry {
    /// Creates an entry stamped with the current time.
    pub fn now(
        user_message: impl Into<String>,
        emotion: EmotionSample,
        response: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: Timestamp::now(),
            user_message: user_message.into(),
            emotion,
            response: response.into(),
        }
    }
}

/// Append-only sink for conversation transcripts.
#[async_trait]
pub trait TranscriptSink: Send + Sync {
    /// Appends one entry to the sink.
    async fn append(&self, entry: &TranscriptEntry) -> Result<(), TranscriptError>;
}

/// Transcript sink errors.
#[derive(Debug, thiserror::Error)]
pub enum TranscriptError {
    #[error("transcript write failed: {0}")]
    Io(String),
}

impl From<std::io::Error> for TranscriptError {
    fn from(err: std::io::Error) -> Self {
        TranscriptError::Io(err.to_string())
    }
}
