//! Mock generation provider for testing.
//!
//! Returns queued completions or errors, simulates latency for timeout
//! testing, and records every request for verification.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{
    CompletionRequest, CompletionResponse, GenerationError, GenerationProvider, ProviderInfo,
};

enum MockResult {
    Success(String),
    Error(GenerationError),
}

/// Configurable mock implementation of `GenerationProvider`.
#[derive(Clone, Default)]
pub struct MockGenerationProvider {
    results: Arc<Mutex<VecDeque<MockResult>>>,
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
    delay: Duration,
}

impl MockGenerationProvider {
    /// Creates a mock with no queued results. Unqueued calls return a
    /// fixed placeholder completion.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful completion.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.results
            .lock()
            .unwrap()
            .push_back(MockResult::Success(content.into()));
        self
    }

    /// Queues an error.
    pub fn with_error(self, error: GenerationError) -> Self {
        self.results
            .lock()
            .unwrap()
            .push_back(MockResult::Error(error));
        self
    }

    /// Sets simulated latency per call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// All recorded requests.
    pub fn get_calls(&self) -> Vec<CompletionRequest> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls made.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl GenerationProvider for MockGenerationProvider {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, GenerationError> {
        self.calls.lock().unwrap().push(request);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.results.lock().unwrap().pop_front() {
            Some(MockResult::Success(content)) => Ok(CompletionResponse {
                content,
                model: "mock-model".to_string(),
            }),
            Some(MockResult::Error(err)) => Err(err),
            None => Ok(CompletionResponse {
                content: "Mock completion".to_string(),
                model: "mock-model".to_string(),
            }),
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("mock", "mock-model")
    }
}
