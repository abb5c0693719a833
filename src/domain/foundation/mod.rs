//! Foundation value objects shared across the domain.

mod auth;
mod errors;
mod ids;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use errors::ValidationError;
pub use ids::{ConversationId, UserId};
pub use timestamp::Timestamp;
