//! PostgreSQL implementation of AdaptationConfigStore.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use sqlx::{PgPool, Row};

use crate::domain::adaptation::GrowthCriteria;
use crate::domain::foundation::DomainError;
use crate::domain::interview::DurationTemplates;
use crate::ports::AdaptationConfigStore;

const GROWTH_CRITERIA_ID: &str = "growth_criteria";
const DURATION_TEMPLATES_ID: &str = "duration_templates";

/// Config documents keyed by id in `adaptation_config`.
#[derive(Clone)]
pub struct PostgresConfigStore {
    pool: PgPool,
}

impl PostgresConfigStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load<T: DeserializeOwned>(&self, id: &str) -> Result<Option<T>, DomainError> {
        let row = sqlx::query("SELECT document FROM adaptation_config WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to fetch {}: {}", id, e)))?;

        match row {
            Some(row) => {
                let document: serde_json::Value = row.get("document");
                serde_json::from_value(document)
                    .map(Some)
                    .map_err(|e| DomainError::malformed(format!("Invalid {}: {}", id, e)))
            }
            None => Ok(None),
        }
    }

    async fn store<T: Serialize>(&self, id: &str, value: &T) -> Result<(), DomainError> {
        let document = serde_json::to_value(value)
            .map_err(|e| DomainError::database(format!("Failed to serialize {}: {}", id, e)))?;

        sqlx::query(
            r#"
            INSERT INTO adaptation_config (id, document, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (id) DO UPDATE SET
                document = EXCLUDED.document,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(id)
        .bind(document)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to store {}: {}", id, e)))?;

        Ok(())
    }
}

#[async_trait]
impl AdaptationConfigStore for PostgresConfigStore {
    async fn growth_criteria(&self) -> Result<Option<GrowthCriteria>, DomainError> {
        self.load(GROWTH_CRITERIA_ID).await
    }

    async fn save_growth_criteria(&self, criteria: &GrowthCriteria) -> Result<(), DomainError> {
        self.store(GROWTH_CRITERIA_ID, criteria).await
    }

    async fn duration_templates(&self) -> Result<Option<DurationTemplates>, DomainError> {
        self.load(DURATION_TEMPLATES_ID).await
    }

    async fn save_duration_templates(
        &self,
        templates: &DurationTemplates,
    ) -> Result<(), DomainError> {
        self.store(DURATION_TEMPLATES_ID, templates).await
    }
}
