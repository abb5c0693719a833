//! The fixed emotion vocabulary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// One of the seven emotions the classifier can report.
///
/// The declaration order is the canonical vocabulary order and is used to
/// break argmax ties deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionLabel {
    Sadness,
    Joy,
    Anger,
    Fear,
    Surprise,
    Disgust,
    Neutral,
}

impl EmotionLabel {
    /// All labels in canonical vocabulary order.
    pub const VOCABULARY: [EmotionLabel; 7] = [
        EmotionLabel::Sadness,
        EmotionLabel::Joy,
        EmotionLabel::Anger,
        EmotionLabel::Fear,
        EmotionLabel::Surprise,
        EmotionLabel::Disgust,
        EmotionLabel::Neutral,
    ];

    /// Returns the lowercase wire name of the label.
    pub fn as_str(&self) -> &'static str {
        match self {
            EmotionLabel::Sadness => "sadness",
            EmotionLabel::Joy => "joy",
            EmotionLabel::Anger => "anger",
            EmotionLabel::Fear => "fear",
            EmotionLabel::Surprise => "surprise",
            EmotionLabel::Disgust => "disgust",
            EmotionLabel::Neutral => "neutral",
        }
    }

    /// Position in the canonical vocabulary, for stable tie-breaking.
    pub fn vocabulary_index(&self) -> usize {
        Self::VOCABULARY
            .iter()
            .position(|l| l == self)
            .expect("label is in vocabulary")
    }
}

impl fmt::Display for EmotionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EmotionLabel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sadness" => Ok(EmotionLabel::Sadness),
            "joy" => Ok(EmotionLabel::Joy),
            "anger" => Ok(EmotionLabel::Anger),
            "fear" => Ok(EmotionLabel::Fear),
            "surprise" => Ok(EmotionLabel::Surprise),
            "disgust" => Ok(EmotionLabel::Disgust),
            "neutral" => Ok(EmotionLabel::Neutral),
            other => Err(ValidationError::invalid_format(
                "emotion",
                format!("'{}' is not in the emotion vocabulary", other),
            )),
        }
    }
}
