//! Database configuration

use serde::Deserialize;

use super::error::ValidationError;

/// PostgreSQL connection configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Connection URL (postgresql://...)
    pub url: String,

    /// Maximum pool connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Minimum pool connections kept warm
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

impl DatabaseConfig {
    /// Validate database configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.url.starts_with("postgres://") && !self.url.starts_with("postgresql://") {
            return Err(ValidationError::InvalidDatabaseUrl);
        }
        if self.min_connections > self.max_connections {
            return Err(ValidationError::InvalidPoolSize);
        }
        Ok(())
    }
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> DatabaseConfig {
        DatabaseConfig {
            url: "postgresql://test@localhost/test".to_string(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
        }
    }

    #[test]
    fn valid_url_passes() {
        assert!(base().validate().is_ok());
    }

    #[test]
    fn non_postgres_url_fails() {
        let config = DatabaseConfig {
            url: "mysql://test@localhost/test".to_string(),
            ..base()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidDatabaseUrl)
        ));
    }

    #[test]
    fn inverted_pool_bounds_fail() {
        let config = DatabaseConfig {
            min_connections: 20,
            max_connections: 5,
            ..base()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidPoolSize)
        ));
    }
}
