//! Emotion classifier configuration

use secrecy::Secret;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Hosted-inference classifier configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierConfig {
    /// Inference API key
    pub api_key: Secret<String>,

    /// Model identifier to query
    #[serde(default = "default_model")]
    pub model: String,

    /// Inference API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl ClassifierConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate classifier configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidClassifierUrl);
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

fn default_model() -> String {
    "j-hartmann/emotion-english-distilroberta-base".to_string()
}

fn default_base_url() -> String {
    "https://api-inference.huggingface.co".to_string()
}

fn default_timeout() -> u64 {
    15
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> ClassifierConfig {
        ClassifierConfig {
            api_key: Secret::new("hf_xxx".to_string()),
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }

    #[test]
    fn defaults_validate() {
        assert!(base().validate().is_ok());
        assert_eq!(base().timeout(), Duration::from_secs(15));
    }

    #[test]
    fn non_http_url_fails() {
        let config = ClassifierConfig {
            base_url: "ftp://models.test".to_string(),
            ..base()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidClassifierUrl)
        ));
    }
}
