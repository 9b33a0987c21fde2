//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables use the `INTERVIEW_ENGINE`
//! prefix and nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use interview_engine::config::{init_tracing, AppConfig};
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! init_tracing(&config.logging);
//! ```

mod ai;
mod engine;
mod error;
mod logging;
mod storage;

pub use ai::{AiConfig, AiProvider};
pub use engine::EngineConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::{init_tracing, LogFormat, LoggingConfig};
pub use storage::{DatabaseConfig, StorageBackend, StorageConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults; only the OpenAI key has no usable default.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// AI provider used by the material generator
    #[serde(default)]
    pub ai: AiConfig,

    /// Profile, config and question-history storage
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub engine: EngineConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with the `INTERVIEW_ENGINE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `INTERVIEW_ENGINE__AI__OPENAI_API_KEY=sk-...` -> `ai.openai_api_key`
    /// - `INTERVIEW_ENGINE__STORAGE__BACKEND=postgres` -> `storage.backend`
    /// - `INTERVIEW_ENGINE__STORAGE__DATABASE__URL=...` -> `storage.database.url`
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("INTERVIEW_ENGINE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Semantic validation of every section
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.ai.validate()?;
        self.storage.validate()?;
        self.engine.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
