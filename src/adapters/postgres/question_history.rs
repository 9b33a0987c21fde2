//! PostgreSQL implementation of QuestionHistory.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::interview::QuestionRecord;
use crate::ports::QuestionHistory;

#[derive(Clone)]
pub struct PostgresQuestionHistory {
    pool: PgPool,
}

impl PostgresQuestionHistory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuestionHistory for PostgresQuestionHistory {
    async fn record(&self, record: &QuestionRecord) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO question_records (id, user_id, kind, skill, subtopic, asked_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(record.id.as_uuid())
        .bind(record.user_id.as_str())
        .bind(record.kind.as_str())
        .bind(&record.skill)
        .bind(&record.subtopic)
        .bind(record.asked_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to insert question record: {}", e)))?;

        Ok(())
    }

    async fn count(
        &self,
        user_id: &UserId,
        skill: &str,
        subtopic: &str,
    ) -> Result<u64, DomainError> {
        let result: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM question_records
            WHERE user_id = $1
              AND lower(btrim(skill)) = lower(btrim($2))
              AND lower(btrim(subtopic)) = lower(btrim($3))
            "#,
        )
        .bind(user_id.as_str())
        .bind(skill)
        .bind(subtopic)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to count question records: {}", e)))?;

        Ok(result.0 as u64)
    }
}
