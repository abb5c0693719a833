//! Mock classifier for testing.
//!
//! Returns queued distributions or errors without calling the Inference
//! API, and records the texts it was asked to classify.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{ClassifierError, LabelScore, TextClassifier};

enum MockResult {
    Distribution(Vec<LabelScore>),
    Error(ClassifierError),
}

/// Configurable mock implementation of `TextClassifier`.
#[derive(Clone, Default)]
pub struct MockClassifier {
    results: Arc<Mutex<VecDeque<MockResult>>>,
    calls: Arc<Mutex<Vec<String>>>,
    delay: Duration,
}

impl MockClassifier {
    /// Creates a mock with no queued results. Unqueued calls return a
    /// flat neutral-leaning distribution.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a distribution to return.
    pub fn with_distribution(self, scores: Vec<LabelScore>) -> Self {
        self.results
            .lock()
            .unwrap()
            .push_back(MockResult::Distribution(scores));
        self
    }

    /// Queues an error to return.
    pub fn with_error(self, error: ClassifierError) -> Self {
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

    /// Texts this mock was asked to classify.
    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls made.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl TextClassifier for MockClassifier {
    async fn classify(&self, text: &str) -> Result<Vec<LabelScore>, ClassifierError> {
        self.calls.lock().unwrap().push(text.to_string());

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.results.lock().unwrap().pop_front() {
            Some(MockResult::Distribution(scores)) => Ok(scores),
            Some(MockResult::Error(err)) => Err(err),
            None => Ok(vec![
                LabelScore::new("neutral", 0.9),
                LabelScore::new("joy", 0.05),
                LabelScore::new("sadness", 0.05),
            ]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_queued_results_in_order() {
        let mock = MockClassifier::new()
            .with_distribution(vec![LabelScore::new("joy", 0.8)])
            .with_error(ClassifierError::EmptyDistribution);

        let first = mock.classify("a").await.unwrap();
        assert_eq!(first[0].label, "joy");

        let second = mock.classify("b").await;
        assert!(matches!(second, Err(ClassifierError::EmptyDistribution)));
    }

    #[tokio::test]
    async fn records_classified_texts() {
        let mock = MockClassifier::new();
        mock.classify("hello").await.unwrap();
        mock.classify("world").await.unwrap();

        assert_eq!(mock.get_calls(), vec!["hello", "world"]);
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn unqueued_calls_get_a_default_distribution() {
        let mock = MockClassifier::new();
        let scores = mock.classify("anything").await.unwrap();
        assert!(!scores.is_empty());
    }
}
