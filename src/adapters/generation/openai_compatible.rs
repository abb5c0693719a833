//! OpenAI-compatible chat-completions adapter.
//!
//! Speaks the `/chat/completions` wire format, which both the Hugging Face
//! inference router and self-hosted gateways expose. One system message
//! carries the orchestrator's instruction; the raw user message follows.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ports::{
    CompletionRequest, CompletionResponse, GenerationError, GenerationProvider, ProviderInfo,
};

/// Configuration for the chat-completions adapter.
#[derive(Debug, Clone)]
pub struct ChatCompletionsConfig {
    /// API key for the gateway.
    api_key: Secret<String>,
    /// Model to generate with.
    pub model: String,
    /// Base URL of the gateway.
    pub base_url: String,
    /// Request timeout. The orchestrator applies its own outer timeout as
    /// well; this one bounds the socket.
    pub timeout: Duration,
}

impl ChatCompletionsConfig {
    /// Creates a configuration with the default instruct model.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "meta-llama/Llama-3.1-8B-Instruct".to_string(),
            base_url: "https://router.huggingface.co/v1".to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the model to generate with.
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

/// Chat-completions implementation of `GenerationProvider`.
pub struct ChatCompletionsProvider {
    config: ChatCompletionsConfig,
    client: Client,
}

impl ChatCompletionsProvider {
    /// Creates a new provider adapter.
    pub fn new(config: ChatCompletionsConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    fn to_wire_request(&self, request: &CompletionRequest) -> WireRequest {
        let mut messages = Vec::new();
        if let Some(ref prompt) = request.system_prompt {
            messages.push(WireMessage {
                role: "system".to_string(),
                content: prompt.clone(),
            });
        }
        messages.push(WireMessage {
            role: "user".to_string(),
            content: request.user_message.clone(),
        });

        WireRequest {
            model: self.config.model.clone(),
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }

    async fn handle_status(&self, response: Response) -> Result<Response, GenerationError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(GenerationError::AuthenticationFailed)
            }
            StatusCode::BAD_REQUEST => Err(GenerationError::InvalidRequest(body)),
            StatusCode::TOO_MANY_REQUESTS => {
                Err(GenerationError::Unavailable(format!("rate limited: {}", body)))
            }
            s if s.is_server_error() => Err(GenerationError::Unavailable(format!(
                "server error {}: {}",
                s, body
            ))),
            s => Err(GenerationError::Network(format!(
                "unexpected status {}: {}",
                s, body
            ))),
        }
    }
}

#[async_trait]
impl GenerationProvider for ChatCompletionsProvider {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, GenerationError> {
        let wire_request = self.to_wire_request(&request);

        let response = self
            .client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .header("Content-Type", "application/json")
            .json(&wire_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerationError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    GenerationError::Network(format!("Connection failed: {}", e))
                } else {
                    GenerationError::Network(e.to_string())
                }
            })?;

        let response = self.handle_status(response).await?;

        let wire_response: WireResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::Parse(format!("Failed to parse response: {}", e)))?;

        let choice = wire_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| GenerationError::Parse("No choices in response".to_string()))?;

        if choice.message.content.trim().is_empty() {
            return Err(GenerationError::EmptyCompletion);
        }

        Ok(CompletionResponse {
            content: choice.message.content,
            model: wire_response.model,
        })
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("chat-completions", &self.config.model)
    }
}

// ----- Wire types -----

#[derive(Debug, Serialize)]
struct WireRequest {
    model: String,
    messages: Vec<WireMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    model: String,
    choices: Vec<WireChoice>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    message: WireMessage,
}
