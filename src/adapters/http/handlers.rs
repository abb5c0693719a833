//! HTTP handlers for the chat endpoints.
//!
//! These handlers connect axum routes to the orchestration service.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::{ChatError, ChatInput, ChatService};
use crate::domain::foundation::ConversationId;

use super::dto::{
    ChatRequest, ChatResponse, ConversationSummaryView, ConversationView, ErrorResponse,
};
use super::middleware::RequireAuth;

/// Shared application state for chat handlers.
#[derive(Clone)]
pub struct ChatAppState {
    pub chat: Arc<ChatService>,
}

impl ChatAppState {
    pub fn new(chat: Arc<ChatService>) -> Self {
        Self { chat }
    }
}

/// POST /api/chat - run one orchestration cycle.
///
/// # Errors
/// - 400 Bad Request: malformed conversation id
/// - 401 Unauthorized: no valid auth token
/// - 404 Not Found: unknown conversation, or one owned by another user
/// - 502 Bad Gateway: emotion classifier unavailable
pub async fn post_chat(
    State(state): State<ChatAppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<ChatRequest>,
) -> Result<impl IntoResponse, ChatApiError> {
    let conversation_id = request
        .conversation_id
        .as_deref()
        .map(|raw| {
            raw.parse::<ConversationId>()
                .map_err(|_| ChatApiError::BadRequest("Invalid conversation ID format".to_string()))
        })
        .transpose()?;

    let outcome = state
        .chat
        .chat(
            &user.id,
            ChatInput {
                user_message: request.user_message,
                conversation_id,
            },
        )
        .await?;

    Ok((StatusCode::OK, Json(ChatResponse::from(outcome))))
}

/// GET /api/history - list the caller's conversations, newest first.
pub async fn get_history(
    State(state): State<ChatAppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ChatApiError> {
    let summaries = state.chat.history(&user.id).await?;
    let views: Vec<ConversationSummaryView> = summaries
        .into_iter()
        .map(ConversationSummaryView::from)
        .collect();
    Ok((StatusCode::OK, Json(views)))
}

/// GET /api/history/:id - fetch one full conversation.
///
/// # Errors
/// - 400 Bad Request: malformed conversation id
/// - 401 Unauthorized: no valid auth token
/// - 404 Not Found: unknown conversation, or one owned by another user
pub async fn get_conversation(
    State(state): State<ChatAppState>,
    RequireAuth(user): RequireAuth,
    Path(conversation_id): Path<String>,
) -> Result<impl IntoResponse, ChatApiError> {
    let conversation_id: ConversationId = conversation_id
        .parse()
        .map_err(|_| ChatApiError::BadRequest("Invalid conversation ID format".to_string()))?;

    let conversation = state.chat.conversation(&user.id, &conversation_id).await?;
    Ok((StatusCode::OK, Json(ConversationView::from(&conversation))))
}

/// API error type that converts pipeline errors to HTTP responses.
#[derive(Debug)]
pub enum ChatApiError {
    BadRequest(String),
    NotFound(ConversationId),
    Upstream(String),
    Internal(String),
}

impl From<ChatError> for ChatApiError {
    fn from(e: ChatError) -> Self {
        match e {
            // Foreign ownership is reported as absence so the API does not
            // leak which ids exist.
            ChatError::NotFound(id) | ChatError::NotOwned(id) => ChatApiError::NotFound(id),
            ChatError::Classification(e) => ChatApiError::Upstream(e.to_string()),
            ChatError::Store(e) => ChatApiError::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for ChatApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ChatApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::bad_request(msg))
            }
            ChatApiError::NotFound(id) => (
                StatusCode::NOT_FOUND,
                ErrorResponse::not_found("Conversation", &id.to_string()),
            ),
            ChatApiError::Upstream(msg) => {
                tracing::error!("classifier failure surfaced to API: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorResponse::upstream("Emotion classification is currently unavailable"),
                )
            }
            ChatApiError::Internal(msg) => {
                tracing::error!("internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::internal("An internal error occurred"),
                )
            }
        };

        (status, Json(error)).into_response()
    }
}
