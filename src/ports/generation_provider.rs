//! Remote generation port.
//!
//! Abstracts the context-conditioned text-generation capability. The
//! orchestrator treats every error from this port the same way: it falls
//! back to the template bank, so the taxonomy below exists for logging and
//! tests rather than for per-variant recovery.

use async_trait::async_trait;

/// Port for the remote generation capability.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Generates a single completion for the request.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, GenerationError>;

    /// Provider name and model, for logging.
    fn provider_info(&self) -> ProviderInfo;
}

/// Request for one completion.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// The raw user message.
    pub user_message: String,
    /// System instruction carrying persona, emotion, summary, and context.
    pub system_prompt: Option<String>,
    /// Bounded output length.
    pub max_tokens: u32,
    /// Fixed sampling temperature.
    pub temperature: f32,
}

impl CompletionRequest {
    /// Creates a request with the orchestrator's default bounds.
    pub fn new(user_message: impl Into<String>) -> Self {
        Self {
            user_message: user_message.into(),
            system_prompt: None,
            max_tokens: 180,
            temperature: 0.7,
        }
    }

    /// Sets the system instruction.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Sets the maximum tokens to generate.
    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = max;
        self
    }

    /// Sets the sampling temperature.
    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = temp;
        self
    }
}

/// Response from the generation capability.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Generated content, not yet trimmed.
    pub content: String,
    /// Model that produced it.
    pub model: String,
}

/// Provider information for logging.
#[derive(Debug, Clone)]
pub struct ProviderInfo {
    /// Provider name (e.g. "hf-inference").
    pub name: String,
    /// Model identifier.
    pub model: String,
}

impl ProviderInfo {
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
        }
    }
}

/// Generation capability errors. All trigger template fallback.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// Request exceeded the configured timeout.
    #[error("generation timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u32 },

    /// Network error during the request.
    #[error("generation network error: {0}")]
    Network(String),

    /// API key rejected.
    #[error("generation authentication failed")]
    AuthenticationFailed,

    /// The capability is unreachable or returned a server error.
    #[error("generation provider unavailable: {0}")]
    Unavailable(String),

    /// The capability answered but the payload was unusable.
    #[error("generation parse error: {0}")]
    Parse(String),

    /// The request was rejected as invalid.
    #[error("invalid generation request: {0}")]
    InvalidRequest(String),

    /// The completion was empty or whitespace-only.
    #[error("generation returned an empty completion")]
    EmptyCompletion,
}
