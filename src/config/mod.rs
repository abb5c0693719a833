//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Configuration is loaded with the
//! `EMPATHY_` prefix and nested values use double underscores as
//! separators.
//!
//! # Example
//!
//! ```no_run
//! use empathy_ai::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod auth;
mod classifier;
mod database;
mod error;
mod generation;
mod server;
mod transcript;

pub use auth::AuthConfig;
pub use classifier::ClassifierConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use generation::GenerationConfig;
pub use server::ServerConfig;
pub use transcript::TranscriptConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, timeouts, CORS)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (PostgreSQL connection)
    pub database: DatabaseConfig,

    /// Authentication configuration (JWT verification)
    pub auth: AuthConfig,

    /// Emotion classifier configuration
    pub classifier: ClassifierConfig,

    /// Response generation configuration
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Transcript log configuration
    #[serde(default)]
    pub transcript: TranscriptConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads a `.env` file if present, then reads environment variables
    /// with the `EMPATHY` prefix, `__` separating nested values:
    ///
    /// - `EMPATHY__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `EMPATHY__DATABASE__URL=...` -> `database.url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("EMPATHY")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate()?;
        self.classifier.validate()?;
        self.generation.validate()?;
        Ok(())
    }
}
