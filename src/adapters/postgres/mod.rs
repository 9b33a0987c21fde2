//! PostgreSQL adapters - Database implementations for the storage ports.
//!
//! - `PostgresProfileRepository` - JSONB profile documents with a version column
//! - `PostgresConfigStore` - Growth criteria and duration templates by id
//! - `PostgresQuestionHistory` - One row per asked question

mod config_store;
mod profile_repository;
mod question_history;

pub use config_store::PostgresConfigStore;
pub use profile_repository::PostgresProfileRepository;
pub use question_history::PostgresQuestionHistory;

use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::config::DatabaseConfig;
use crate::domain::foundation::DomainError;

/// Open a connection pool and apply the embedded migrations when enabled.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DomainError> {
    let pool = PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .idle_timeout(config.idle_timeout())
        .max_lifetime(config.max_lifetime())
        .connect(&config.url)
        .await
        .map_err(|e| DomainError::database(format!("Failed to connect: {}", e)))?;

    if config.run_migrations {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to run migrations: {}", e)))?;
        tracing::info!("database migrations applied");
    }

    Ok(pool)
}
