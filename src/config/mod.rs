//! Application configuration.
//!
//! Type-safe configuration loaded from environment variables with the
//! `DEALCOMPASS` prefix; nested values use `__` as the separator, so
//! `DEALCOMPASS__DATABASE__URL` maps to `database.url`. A `.env` file
//! is honored in development.

mod ai;
mod database;
mod error;

pub use ai::AiConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};

use serde::Deserialize;

/// Root configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,

    #[serde(default)]
    pub ai: AiConfig,
}

impl AppConfig {
    /// Load configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when required variables are missing or a
    /// value cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config: Self = config::Config::builder()
            .add_source(config::Environment::default().prefix("DEALCOMPASS").separator("__"))
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    /// Semantic validation across all sections.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.database.validate()?;
        self.ai.validate()?;
        Ok(())
    }
}
