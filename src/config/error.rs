//! Errors raised while assembling `EngineConfig`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Sources could not be read or deserialized.
    #[error("failed to load engine configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("engine configuration rejected: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// A loaded value that the engine cannot run with.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} must be set")]
    MissingRequired(&'static str),

    #[error("OpenAI API key must start with 'sk-'")]
    InvalidApiKey,

    #[error("{0} must be greater than zero")]
    InvalidTimeout(&'static str),

    #[error("database URL must use the postgres:// or postgresql:// scheme")]
    InvalidDatabaseUrl,

    #[error("connection pool size must be between 1 and 100")]
    InvalidPoolSize,

    #[error("unrecognised log filter '{0}'")]
    InvalidLogLevel(String),
}
