//! Response orchestrator.
//!
//! Attempts a remote, context-conditioned generation call and falls back
//! deterministically to the template bank when the capability is missing or
//! fails. The fallback is transparent: `generate` never errors and always
//! returns usable text.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::domain::conversation::{ConversationTurn, TurnRole};
use crate::domain::emotion::EmotionLabel;
use crate::domain::templates::TemplateBank;
use crate::ports::{CompletionRequest, GenerationProvider};

/// Persona and tone directive embedded in every generation request.
const PERSONA_DIRECTIVE: &str = "You're chatting with your best friend. Your persona is super \
friendly, modern, and empathetic. Use current, natural-sounding slang where it fits. Keep it \
real and avoid sounding like a stuffy, repetitive AI. Your main goal is to listen, validate \
their feelings, and make them feel supported. Use emojis to add to the vibe. Always try to end \
with a gentle, open-ended question to keep the conversation flowing naturally.";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);
const DEFAULT_MAX_TOKENS: u32 = 180;
const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Produces the final reply text for one classified utterance.
pub struct ResponseGenerator {
    provider: Option<Arc<dyn GenerationProvider>>,
    templates: TemplateBank,
    rng: Mutex<StdRng>,
    timeout: Duration,
    max_tokens: u32,
    temperature: f32,
}

impl ResponseGenerator {
    /// Creates a generator with no remote capability: every call falls back
    /// to the template bank.
    pub fn template_only() -> Self {
        Self {
            provider: None,
            templates: TemplateBank::builtin().clone(),
            rng: Mutex::new(StdRng::from_entropy()),
            timeout: DEFAULT_TIMEOUT,
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Attaches the remote generation capability.
    pub fn with_provider(mut self, provider: Arc<dyn GenerationProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Replaces the template bank.
    pub fn with_templates(mut self, templates: TemplateBank) -> Self {
        self.templates = templates;
        self
    }

    /// Seeds the template-selection RNG for deterministic tests.
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    /// Bounds the remote generation call.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets generation length and sampling parameters.
    pub fn with_sampling(mut self, max_tokens: u32, temperature: f32) -> Self {
        self.max_tokens = max_tokens;
        self.temperature = temperature;
        self
    }

    /// Generates an empathetic reply.
    ///
    /// Tries the remote capability first when configured; on any failure
    /// (timeout, network, auth, empty output) logs a warning and falls back
    /// to the template bank for the same emotion. Never returns an error.
    pub async fn generate(
        &self,
        emotion: EmotionLabel,
        user_message: &str,
        context_window: &[ConversationTurn],
        emotion_summary: &str,
    ) -> String {
        let Some(provider) = &self.provider else {
            tracing::debug!(%emotion, "no generation provider configured, using template");
            return self.template_response(emotion);
        };

        let system_prompt = build_system_prompt(emotion, emotion_summary, context_window);
        let request = CompletionRequest::new(user_message)
            .with_system_prompt(system_prompt)
            .with_max_tokens(self.max_tokens)
            .with_temperature(self.temperature);

        match tokio::time::timeout(self.timeout, provider.complete(request)).await {
            Ok(Ok(response)) => {
                let text = response.content.trim();
                if text.is_empty() {
                    tracing::warn!(
                        model = %response.model,
                        "generation returned empty output, falling back to template"
                    );
                    self.template_response(emotion)
                } else {
                    text.to_string()
                }
            }
            Ok(Err(err)) => {
                tracing::warn!(error = %err, "generation failed, falling back to template");
                self.template_response(emotion)
            }
            Err(_) => {
                tracing::warn!(
                    timeout_secs = self.timeout.as_secs(),
                    "generation timed out, falling back to template"
                );
                self.template_response(emotion)
            }
        }
    }

    /// Draws a canned phrase for the emotion.
    pub fn template_response(&self, emotion: EmotionLabel) -> String {
        let mut rng = self.rng.lock().expect("rng lock is never poisoned");
        self.templates.pick(emotion, &mut *rng).to_string()
    }
}

/// Builds the system instruction: persona, current emotion, optional journey
/// summary, and the serialized context window in chronological order.
fn build_system_prompt(
    emotion: EmotionLabel,
    emotion_summary: &str,
    context_window: &[ConversationTurn],
) -> String {
    let mut context = String::new();
    for turn in context_window {
        match turn.role {
            TurnRole::User => {
                context.push_str("User: ");
                context.push_str(&turn.content);
                context.push('\n');
            }
            TurnRole::Assistant => {
                context.push_str("AI: ");
                context.push_str(&turn.content);
                context.push('\n');
            }
        }
    }

    let mut prompt = format!(
        "{} The user is currently feeling {}.",
        PERSONA_DIRECTIVE, emotion
    );
    if !emotion_summary.is_empty() {
        prompt.push(' ');
        prompt.push_str(emotion_summary);
    }
    prompt.push_str(" Here is the recent conversation context:\n");
    prompt.push_str(&context);
    prompt
}
