//! Emotion vocabulary and classification samples.
//!
//! The vocabulary is closed: seven labels matching the upstream
//! text-classification model. Anything outside it is a contract violation of
//! the classifier adapter, never silently coerced.

mod label;
mod sample;

pub use label::EmotionLabel;
pub use sample::EmotionSample;
