//! Hugging Face Inference API classifier adapter.
//!
//! Calls the hosted text-classification endpoint for the emotion model and
//! returns the raw label distribution. The adapter does not select the
//! argmax or enforce the vocabulary; that is the detector's job.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ports::{ClassifierError, LabelScore, TextClassifier};

/// Configuration for the Hugging Face classifier adapter.
#[derive(Debug, Clone)]
pub struct HfClassifierConfig {
    /// API token for the Inference API.
    api_key: Secret<String>,
    /// Model to score against.
    pub model: String,
    /// Base URL of the Inference API.
    pub base_url: String,
    /// Request timeout. Classification has no fallback path, so exceeding
    /// this is a hard failure.
    pub timeout: Duration,
}

impl HfClassifierConfig {
    /// Creates a configuration with the default emotion model.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "j-hartmann/emotion-english-distilroberta-base".to_string(),
            base_url: "https://api-inference.huggingface.co".to_string(),
            timeout: Duration::from_secs(15),
        }
    }

    /// Sets the model to score against.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Hugging Face Inference API implementation of `TextClassifier`.
pub struct HfClassifier {
    config: HfClassifierConfig,
    client: Client,
}

impl HfClassifier {
    /// Creates a new classifier adapter.
    pub fn new(config: HfClassifierConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn model_url(&self) -> String {
        format!("{}/models/{}", self.config.base_url, self.config.model)
    }

    async fn handle_status(&self, response: Response) -> Result<Response, ClassifierError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(ClassifierError::AuthenticationFailed)
            }
            StatusCode::TOO_MANY_REQUESTS => Err(ClassifierError::Unavailable(format!(
                "rate limited: {}",
                body
            ))),
            s if s.is_server_error() => Err(ClassifierError::Unavailable(format!(
                "server error {}: {}",
                s, body
            ))),
            s => Err(ClassifierError::Network(format!(
                "unexpected status {}: {}",
                s, body
            ))),
        }
    }
}

#[async_trait]
impl TextClassifier for HfClassifier {
    async fn classify(&self, text: &str) -> Result<Vec<LabelScore>, ClassifierError> {
        let response = self
            .client
            .post(self.model_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .json(&HfRequest { inputs: text })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ClassifierError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    ClassifierError::Network(format!("Connection failed: {}", e))
                } else {
                    ClassifierError::Network(e.to_string())
                }
            })?;

        let response = self.handle_status(response).await?;

        // The endpoint wraps the distribution in an outer list per input.
        let batches: Vec<Vec<HfScore>> = response
            .json()
            .await
            .map_err(|e| ClassifierError::Parse(format!("Failed to parse response: {}", e)))?;

        let scores = batches
            .into_iter()
            .next()
            .ok_or_else(|| ClassifierError::Parse("no distribution in response".to_string()))?;

        Ok(scores
            .into_iter()
            .map(|s| LabelScore::new(s.label, s.score))
            .collect())
    }
}

#[derive(Debug, Serialize)]
struct HfRequest<'a> {
    inputs: &'a str,
}

#[derive(Debug, Deserialize)]
struct HfScore {
    label: String,
    score: f64,
}
