//! Transcript log configuration

use serde::Deserialize;

/// Append-only transcript log configuration.
///
/// An absent path disables transcript logging entirely.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TranscriptConfig {
    /// Path of the transcript log file
    pub path: Option<String>,
}

impl TranscriptConfig {
    /// Check if transcript logging is enabled
    pub fn enabled(&self) -> bool {
        self.path.as_ref().is_some_and(|p| !p.is_empty())
    }
}
