//! Append-only file transcript sink.
//!
//! Writes one block per orchestration cycle in the service's long-standing
//! log layout. Appends are serialized with an internal lock so concurrent
//! cycles cannot interleave blocks.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::ports::{TranscriptEntry, TranscriptError, TranscriptSink};

const SEPARATOR: &str = "----------------------------------------";

/// File-backed transcript sink.
pub struct FileTranscriptSink {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileTranscriptSink {
    /// Creates a sink appending to the given path. Parent directories are
    /// created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// The log file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn format_entry(entry: &TranscriptEntry) -> String {
        format!(
            "[{}]\nUser: {}\nEmotion: {} (Confidence: {})\nAI: {}\n{}\n",
            entry.timestamp.log_format(),
            entry.user_message,
            entry.emotion.label(),
            entry.emotion.confidence(),
            entry.response,
            SEPARATOR,
        )
    }
}

#[async_trait]
impl TranscriptSink for FileTranscriptSink {
    async fn append(&self, entry: &TranscriptEntry) -> Result<(), TranscriptError> {
        let _guard = self.write_lock.lock().await;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(Self::format_entry(entry).as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::emotion::{EmotionLabel, EmotionSample};

    fn entry(message: &str, response: &str) -> TranscriptEntry {
        TranscriptEntry::now(
            message,
            EmotionSample::new(EmotionLabel::Joy, 0.99).unwrap(),
            response,
        )
    }

    #[test]
    fn entry_format_matches_log_layout() {
        let formatted = FileTranscriptSink::format_entry(&entry(
            "I feel amazing today!",
            "That's wonderful to hear!",
        ));

        assert!(formatted.contains("User: I feel amazing today!"));
        assert!(formatted.contains("Emotion: joy (Confidence: 0.99)"));
        assert!(formatted.contains("AI: That's wonderful to hear!"));
        assert!(formatted.ends_with(&format!("{}\n", SEPARATOR)));
    }

    #[tokio::test]
    async fn append_accumulates_entries() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileTranscriptSink::new(dir.path().join("logs/conversation.log"));

        sink.append(&entry("first", "reply one")).await.unwrap();
        sink.append(&entry("second", "reply two")).await.unwrap();

        let content = tokio::fs::read_to_string(sink.path()).await.unwrap();
        let first = content.find("User: first").unwrap();
        let second = content.find("User: second").unwrap();
        assert!(first < second);
        assert_eq!(content.matches(SEPARATOR).count(), 2);
    }
}
