//! Axum routes for the chat endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{get_conversation, get_history, post_chat, ChatAppState};

/// Creates routes for the chat endpoints.
///
/// - POST /chat - run one orchestration cycle
/// - GET /history - list the caller's conversations
/// - GET /history/:conversation_id - fetch one full conversation
pub fn chat_routes() -> Router<ChatAppState> {
    Router::new()
        .route("/chat", post(post_chat))
        .route("/history", get(get_history))
        .route("/history/:conversation_id", get(get_conversation))
}

/// Combined router with all chat routes under /api.
pub fn chat_router() -> Router<ChatAppState> {
    Router::new().nest("/api", chat_routes())
}
