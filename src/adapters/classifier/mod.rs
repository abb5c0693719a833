//! Text classification adapters.

mod hf_inference;
mod mock;

pub use hf_inference::{HfClassifier, HfClassifierConfig};
pub use mock::MockClassifier;
