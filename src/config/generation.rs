//! Response generation configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Chat-completions provider configuration.
///
/// The API key is optional: without one the pipeline runs in template-only
/// mode, answering every message from the emotion-keyed phrase bank.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationConfig {
    /// Provider API key; absent means template-only mode
    pub api_key: Option<Secret<String>>,

    /// Model identifier for completions
    #[serde(default = "default_model")]
    pub model: String,

    /// Provider base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds, applied around each completion call
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Completion length cap
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f64,
}

impl GenerationConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if a provider is configured
    pub fn has_provider(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().is_empty())
    }

    /// Validate generation configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidGenerationUrl);
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ValidationError::InvalidTemperature);
        }
        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }
}

fn default_model() -> String {
    "meta-llama/Llama-3.1-8B-Instruct".to_string()
}

fn default_base_url() -> String {
    "https://router.huggingface.co/v1".to_string()
}

fn default_timeout() -> u64 {
    20
}

fn default_max_tokens() -> u32 {
    180
}

fn default_temperature() -> f64 {
    0.7
}
