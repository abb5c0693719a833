//! Text classification port.
//!
//! Abstracts the external text-classification capability that scores an
//! utterance against the emotion vocabulary. Implementations return the raw
//! label distribution; argmax selection and vocabulary enforcement live in
//! the `EmotionDetector` one layer up.

use async_trait::async_trait;

/// Port for the external text-classification capability.
///
/// The returned distribution covers the full emotion vocabulary. Scores need
/// not sum to 1 but must be comparable for argmax.
#[async_trait]
pub trait TextClassifier: Send + Sync {
    /// Scores `text` against the emotion vocabulary.
    ///
    /// # Errors
    ///
    /// Failures are NOT swallowed here: classification has no fallback path,
    /// so timeouts and malformed responses propagate to the caller.
    async fn classify(&self, text: &str) -> Result<Vec<LabelScore>, ClassifierError>;
}

/// One `{label, score}` pair from the classifier's distribution.
///
/// The label is the provider's raw string; mapping into the closed
/// vocabulary happens in the detector so an out-of-vocabulary label can be
/// reported as the contract violation it is.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelScore {
    pub label: String,
    pub score: f64,
}

impl LabelScore {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// Classifier errors. All of these are fatal to the current request.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    /// Request exceeded the configured timeout.
    #[error("classification timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u32 },

    /// Network error reaching the capability.
    #[error("classifier network error: {0}")]
    Network(String),

    /// The capability answered but the payload was unusable.
    #[error("classifier parse error: {0}")]
    Parse(String),

    /// The capability is unreachable or returned a server error.
    #[error("classifier unavailable: {0}")]
    Unavailable(String),

    /// API key rejected.
    #[error("classifier authentication failed")]
    AuthenticationFailed,

    /// The distribution contained a label outside the fixed vocabulary.
    #[error("classifier returned out-of-vocabulary label '{label}'")]
    OutOfVocabulary { label: String },

    /// The distribution was empty.
    #[error("classifier returned an empty distribution")]
    EmptyDistribution,
}
