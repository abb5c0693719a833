//! Emotion classifier adapter.
//!
//! Wraps the `TextClassifier` port and converts the raw label distribution
//! into a single [`EmotionSample`]. Empty input short-circuits to the
//! neutral fixed point without touching the capability. Failures are never
//! swallowed here: classification has no fallback, so errors propagate and
//! are request-fatal.

use std::sync::Arc;

use crate::domain::emotion::{EmotionLabel, EmotionSample};
use crate::ports::{ClassifierError, TextClassifier};

/// Converts raw text into the single best emotion with confidence.
#[derive(Clone)]
pub struct EmotionDetector {
    classifier: Arc<dyn TextClassifier>,
}

impl EmotionDetector {
    /// Creates a detector over the given classification capability.
    pub fn new(classifier: Arc<dyn TextClassifier>) -> Self {
        Self { classifier }
    }

    /// Detects the primary emotion for the given text.
    ///
    /// Empty or whitespace-only input returns `{neutral, 1.00}` without
    /// invoking the capability. Otherwise the argmax of the returned
    /// distribution is selected, with ties broken by vocabulary order so the
    /// result is deterministic, and the score rounded to two decimals.
    ///
    /// # Errors
    ///
    /// - any capability failure (timeout, network, malformed response)
    /// - `OutOfVocabulary` if the distribution names an unknown label
    /// - `EmptyDistribution` if the capability returned no pairs
    pub async fn detect(&self, text: &str) -> Result<EmotionSample, ClassifierError> {
        if text.trim().is_empty() {
            return Ok(EmotionSample::neutral());
        }

        let scores = self.classifier.classify(text).await?;
        if scores.is_empty() {
            return Err(ClassifierError::EmptyDistribution);
        }

        let mut best: Option<(EmotionLabel, f64)> = None;
        for pair in scores {
            let label: EmotionLabel =
                pair.label
                    .parse()
                    .map_err(|_| ClassifierError::OutOfVocabulary {
                        label: pair.label.clone(),
                    })?;

            best = match best {
                None => Some((label, pair.score)),
                Some((b_label, b_score)) => {
                    let wins = pair.score > b_score
                        || (pair.score == b_score
                            && label.vocabulary_index() < b_label.vocabulary_index());
                    if wins {
                        Some((label, pair.score))
                    } else {
                        Some((b_label, b_score))
                    }
                }
            };
        }

        let (label, score) = best.expect("distribution is nonempty");
        EmotionSample::new(label, score)
            .map_err(|e| ClassifierError::Parse(format!("invalid score from classifier: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::classifier::MockClassifier;
    use crate::ports::LabelScore;

    fn detector_with(scores: Vec<LabelScore>) -> EmotionDetector {
        EmotionDetector::new(Arc::new(MockClassifier::new().with_distribution(scores)))
    }

    #[tokio::test]
    async fn empty_input_is_the_neutral_fixed_point() {
        // The mock would panic the contract if called: give it nothing.
        let detector = EmotionDetector::new(Arc::new(MockClassifier::new()));

        for text in ["", "   ", "\n\t "] {
            let sample = detector.detect(text).await.unwrap();
            assert_eq!(sample.label(), EmotionLabel::Neutral);
            assert_eq!(sample.confidence(), 1.0);
        }
    }

    #[tokio::test]
    async fn selects_the_argmax_label() {
        let detector = detector_with(vec![
            LabelScore::new("sadness", 0.05),
            LabelScore::new("joy", 0.871),
            LabelScore::new("neutral", 0.02),
        ]);

        let sample = detector.detect("great news!").await.unwrap();
        assert_eq!(sample.label(), EmotionLabel::Joy);
        assert_eq!(sample.confidence(), 0.87);
    }

    #[tokio::test]
    async fn ties_break_by_vocabulary_order() {
        // anger precedes fear in the vocabulary, regardless of wire order
        let detector = detector_with(vec![
            LabelScore::new("fear", 0.5),
            LabelScore::new("anger", 0.5),
        ]);

        let sample = detector.detect("...").await.unwrap();
        assert_eq!(sample.label(), EmotionLabel::Anger);
    }

    #[tokio::test]
    async fn out_of_vocabulary_label_is_a_contract_violation() {
        let detector = detector_with(vec![
            LabelScore::new("joy", 0.4),
            LabelScore::new("love", 0.6),
        ]);

        let err = detector.detect("aww").await.unwrap_err();
        assert!(matches!(err, ClassifierError::OutOfVocabulary { label } if label == "love"));
    }

    #[tokio::test]
    async fn empty_distribution_is_an_error() {
        let detector = detector_with(vec![]);
        let err = detector.detect("hm").await.unwrap_err();
        assert!(matches!(err, ClassifierError::EmptyDistribution));
    }

    #[tokio::test]
    async fn capability_failure_propagates() {
        let detector = EmotionDetector::new(Arc::new(
            MockClassifier::new().with_error(ClassifierError::Unavailable("down".to_string())),
        ));

        let err = detector.detect("hello").await.unwrap_err();
        assert!(matches!(err, ClassifierError::Unavailable(_)));
    }
}
