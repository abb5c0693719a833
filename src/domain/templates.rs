//! Template bank: curated empathetic phrases per emotion label.
//!
//! The bank is data-driven: phrases live in `templates.json` (or any caller
//! supplied JSON document) so they can be extended without touching
//! orchestration logic. Selection is a uniform-random draw over the matched
//! bucket using a caller-injected RNG, which keeps tests deterministic.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::emotion::EmotionLabel;

/// Key of the bucket used when an emotion label has no bucket of its own.
const DEFAULT_BUCKET: &str = "default";

static BUILTIN: Lazy<TemplateBank> = Lazy::new(|| {
    TemplateBank::from_json_str(include_str!("templates.json"))
        .expect("built-in template bank is valid")
});

/// Errors raised when loading a template document.
#[derive(Debug, Error)]
pub enum TemplateBankError {
    #[error("template document is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("bucket '{0}' is empty")]
    EmptyBucket(String),

    #[error("template document has no '{DEFAULT_BUCKET}' bucket")]
    MissingDefault,
}

/// Static mapping from emotion label to canned empathetic phrases.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "HashMap<String, Vec<String>>")]
pub struct TemplateBank {
    buckets: HashMap<String, Vec<String>>,
}

impl TemplateBank {
    /// Returns the built-in phrase set shipped with the crate.
    pub fn builtin() -> &'static TemplateBank {
        &BUILTIN
    }

    /// Loads a bank from a JSON document mapping label names to phrase
    /// lists.
    ///
    /// # Errors
    ///
    /// - `Malformed` if the document is not a JSON object of string arrays
    /// - `EmptyBucket` if any bucket has no phrases
    /// - `MissingDefault` if the `default` bucket is absent
    pub fn from_json_str(json: &str) -> Result<Self, TemplateBankError> {
        let buckets: HashMap<String, Vec<String>> = serde_json::from_str(json)?;
        Self::try_from(buckets)
    }

    /// Draws one phrase for the given emotion.
    ///
    /// Labels without a bucket of their own fall back to `default`; a
    /// missing key must never crash response generation.
    pub fn pick<R: Rng + ?Sized>(&self, emotion: EmotionLabel, rng: &mut R) -> &str {
        let bucket = self
            .buckets
            .get(emotion.as_str())
            .unwrap_or_else(|| &self.buckets[DEFAULT_BUCKET]);
        bucket
            .choose(rng)
            .expect("buckets are validated nonempty at load")
    }

    /// Phrases available for a label, if the label has its own bucket.
    pub fn bucket(&self, emotion: EmotionLabel) -> Option<&[String]> {
        self.buckets.get(emotion.as_str()).map(Vec::as_slice)
    }
}

impl TryFrom<HashMap<String, Vec<String>>> for TemplateBank {
    type Error = TemplateBankError;

    fn try_from(buckets: HashMap<String, Vec<String>>) -> Result<Self, Self::Error> {
        if !buckets.contains_key(DEFAULT_BUCKET) {
            return Err(TemplateBankError::MissingDefault);
        }
        for (name, phrases) in &buckets {
            if phrases.is_empty() {
                return Err(TemplateBankError::EmptyBucket(name.clone()));
            }
        }
        Ok(Self { buckets })
    }
}
