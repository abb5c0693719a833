//! Classification result value object.

use serde::{Deserialize, Serialize};

use super::EmotionLabel;
use crate::domain::foundation::ValidationError;

/// The best emotion for an utterance together with the classifier's
/// confidence.
///
/// Confidence is always stored rounded to two decimal places and is
/// guaranteed to lie in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmotionSample {
    label: EmotionLabel,
    confidence: f64,
}

impl EmotionSample {
    /// Creates a sample, rounding confidence to two decimals.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidFormat` if confidence falls outside
    /// `[0, 1]` after rounding.
    pub fn new(label: EmotionLabel, confidence: f64) -> Result<Self, ValidationError> {
        let confidence = round_two_decimals(confidence);
        if !(0.0..=1.0).contains(&confidence) || confidence.is_nan() {
            return Err(ValidationError::invalid_format(
                "confidence",
                format!("{} is outside [0, 1]", confidence),
            ));
        }
        Ok(Self { label, confidence })
    }

    /// The fixed point returned for empty input: neutral with full confidence.
    pub fn neutral() -> Self {
        Self {
            label: EmotionLabel::Neutral,
            confidence: 1.0,
        }
    }

    /// The detected emotion label.
    pub fn label(&self) -> EmotionLabel {
        self.label
    }

    /// Confidence in `[0, 1]`, rounded to two decimals.
    pub fn confidence(&self) -> f64 {
        self.confidence
    }
}

fn round_two_decimals(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn neutral_fixed_point_has_full_confidence() {
        let sample = EmotionSample::neutral();
        assert_eq!(sample.label(), EmotionLabel::Neutral);
        assert_eq!(sample.confidence(), 1.0);
    }

    #[test]
    fn confidence_is_rounded_to_two_decimals() {
        let sample = EmotionSample::new(EmotionLabel::Joy, 0.91537).unwrap();
        assert_eq!(sample.confidence(), 0.92);

        let sample = EmotionSample::new(EmotionLabel::Joy, 0.004).unwrap();
        assert_eq!(sample.confidence(), 0.0);
    }

    #[test]
    fn rejects_out_of_range_confidence() {
        assert!(EmotionSample::new(EmotionLabel::Fear, 1.5).is_err());
        assert!(EmotionSample::new(EmotionLabel::Fear, -0.2).is_err());
        assert!(EmotionSample::new(EmotionLabel::Fear, f64::NAN).is_err());
    }

    #[test]
    fn boundary_values_survive_rounding() {
        // 1.004 rounds down to 1.0 and is accepted
        assert!(EmotionSample::new(EmotionLabel::Anger, 1.004).is_ok());
        // 1.005 rounds up past the boundary
        assert!(EmotionSample::new(EmotionLabel::Anger, 1.01).is_err());
    }

    proptest! {
        #[test]
        fn valid_scores_always_yield_rounded_in_range(score in 0.0f64..=1.0) {
            let sample = EmotionSample::new(EmotionLabel::Sadness, score).unwrap();
            let c = sample.confidence();
            prop_assert!((0.0..=1.0).contains(&c));
            // Rounded to exactly two decimals: scaling by 100 gives an integer.
            prop_assert!(((c * 100.0).round() - c * 100.0).abs() < 1e-9);
        }
    }
}
