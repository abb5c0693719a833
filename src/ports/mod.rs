//! Ports: contracts the core consumes from external collaborators.
//!
//! Implementations live under `adapters/`. The core depends only on these
//! traits, taken as `Arc<dyn Trait>` at construction time.

mod conversation_store;
mod emotion_classifier;
mod generation_provider;
mod token_verifier;
mod transcript;

pub use conversation_store::{ConversationStore, ConversationSummary, StoreError};
pub use emotion_classifier::{ClassifierError, LabelScore, TextClassifier};
pub use generation_provider::{
    CompletionRequest, CompletionResponse, GenerationError, GenerationProvider, ProviderInfo,
};
pub use token_verifier::TokenVerifier;
pub use transcript::{TranscriptEntry, TranscriptError, TranscriptSink};
