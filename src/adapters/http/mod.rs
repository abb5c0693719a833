//! HTTP adapter: axum handlers, DTOs, routes, and auth middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use handlers::ChatAppState;
pub use middleware::{auth_middleware, AuthState, RequireAuth};
pub use routes::chat_router;
