//! HTTP DTOs for the chat endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::application::ChatOutcome;
use crate::domain::conversation::{Conversation, ConversationTurn, TurnRole};
use crate::domain::emotion::EmotionSample;
use crate::ports::ConversationSummary;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// The user's message. May be empty; the pipeline has a fixed answer
    /// for that case.
    #[serde(default)]
    pub user_message: String,
    /// Conversation to continue. Absent means start a new one.
    #[serde(default)]
    pub conversation_id: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Body of a successful `POST /api/chat`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    /// The assistant's reply (generated or template fallback).
    pub response_text: String,
    /// Conversation the turn was appended to.
    pub conversation_id: String,
    /// Emotion detected in the user message.
    pub detected_emotion: EmotionDto,
}

impl From<ChatOutcome> for ChatResponse {
    fn from(outcome: ChatOutcome) -> Self {
        Self {
            response_text: outcome.response_text,
            conversation_id: outcome.conversation_id.to_string(),
            detected_emotion: EmotionDto::from(outcome.detected_emotion),
        }
    }
}

/// An emotion sample for API responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionDto {
    pub label: String,
    pub confidence: f64,
}

impl From<EmotionSample> for EmotionDto {
    fn from(sample: EmotionSample) -> Self {
        Self {
            label: sample.label().to_string(),
            confidence: sample.confidence(),
        }
    }
}

/// One row of `GET /api/history`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSummaryView {
    pub id: String,
    pub title: String,
    pub created_at: String,
}

impl From<ConversationSummary> for ConversationSummaryView {
    fn from(summary: ConversationSummary) -> Self {
        Self {
            id: summary.id.to_string(),
            title: summary.title,
            created_at: summary.created_at.as_datetime().to_rfc3339(),
        }
    }
}

/// Full conversation view for `GET /api/history/:id`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationView {
    pub id: String,
    pub title: String,
    pub created_at: String,
    pub turns: Vec<TurnView>,
}

impl From<&Conversation> for ConversationView {
    fn from(conversation: &Conversation) -> Self {
        Self {
            id: conversation.id().to_string(),
            title: conversation.title().to_string(),
            created_at: conversation.created_at().as_datetime().to_rfc3339(),
            turns: conversation.turns().iter().map(TurnView::from).collect(),
        }
    }
}

/// One turn inside a [`ConversationView`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnView {
    pub role: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotion: Option<String>,
}

impl From<&ConversationTurn> for TurnView {
    fn from(turn: &ConversationTurn) -> Self {
        Self {
            role: match turn.role {
                TurnRole::User => "user".to_string(),
                TurnRole::Assistant => "assistant".to_string(),
            },
            content: turn.content.clone(),
            emotion: turn.emotion.map(|e| e.to_string()),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Response
// ════════════════════════════════════════════════════════════════════════════════

/// Standard error response body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: "BAD_REQUEST".to_string(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        Self {
            error: format!("{} {} not found", resource, id),
            code: "NOT_FOUND".to_string(),
        }
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: "UPSTREAM_ERROR".to_string(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: "INTERNAL_ERROR".to_string(),
        }
    }
}
