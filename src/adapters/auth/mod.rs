//! Token verification adapters.

mod hs256;
mod mock;

pub use hs256::Hs256TokenVerifier;
pub use mock::MockTokenVerifier;
