//! PostgreSQL implementation of ProfileRepository.
//!
//! Each profile is one JSONB document; the `version` column backs the
//! optimistic concurrency check on save.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::profile::SkillProfile;
use crate::ports::ProfileRepository;

/// PostgreSQL implementation of ProfileRepository.
#[derive(Clone)]
pub struct PostgresProfileRepository {
    pool: PgPool,
}

impl PostgresProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn stored_version(&self, user_id: &UserId) -> Result<Option<u64>, DomainError> {
        let row = sqlx::query("SELECT version FROM skill_profiles WHERE user_id = $1")
            .bind(user_id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to fetch profile version", e))?;

        Ok(row.map(|row| row.get::<i64, _>("version") as u64))
    }
}

fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    DomainError::database(format!("{}: {}", context, e))
}

fn to_document(profile: &SkillProfile) -> Result<serde_json::Value, DomainError> {
    serde_json::to_value(profile)
        .map_err(|e| DomainError::database(format!("Failed to serialize profile: {}", e)))
}

fn row_to_profile(row: sqlx::postgres::PgRow) -> Result<SkillProfile, DomainError> {
    let user_id: String = row.get("user_id");
    let version: i64 = row.get("version");
    let document: serde_json::Value = row.get("document");

    let mut profile: SkillProfile = serde_json::from_value(document).map_err(|e| {
        DomainError::malformed(format!("Invalid profile document: {}", e))
            .with_detail("user_id", user_id.clone())
    })?;
    if profile.user_id().as_str() != user_id {
        return Err(DomainError::malformed("Profile document belongs to another user")
            .with_detail("user_id", user_id));
    }
    profile.set_version(version as u64);
    profile.validate()?;
    Ok(profile)
}

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    async fn create(&self, profile: &SkillProfile) -> Result<(), DomainError> {
        profile.validate()?;
        let result = sqlx::query(
            r#"
            INSERT INTO skill_profiles (user_id, document, version, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id) DO NOTHING
            "#,
        )
        .bind(profile.user_id().as_str())
        .bind(to_document(profile)?)
        .bind(profile.version() as i64)
        .bind(profile.created_at().as_datetime())
        .bind(profile.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to insert profile", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::profile_exists(profile.user_id()));
        }
        Ok(())
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<SkillProfile>, DomainError> {
        let row = sqlx::query(
            "SELECT user_id, document, version FROM skill_profiles WHERE user_id = $1",
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch profile", e))?;

        row.map(row_to_profile).transpose()
    }

    async fn save(&self, profile: &SkillProfile) -> Result<u64, DomainError> {
        let next_version = profile.version() + 1;
        let mut next = profile.clone();
        next.set_version(next_version);

        let result = sqlx::query(
            r#"
            UPDATE skill_profiles SET
                document = $2,
                version = $3,
                updated_at = $4
            WHERE user_id = $1 AND version = $5
            "#,
        )
        .bind(profile.user_id().as_str())
        .bind(to_document(&next)?)
        .bind(next_version as i64)
        .bind(profile.updated_at().as_datetime())
        .bind(profile.version() as i64)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update profile", e))?;

        if result.rows_affected() == 0 {
            return match self.stored_version(profile.user_id()).await? {
                Some(found) => Err(DomainError::concurrent_modification(
                    profile.user_id(),
                    profile.version(),
                    found,
                )),
                None => Err(DomainError::profile_not_found(profile.user_id())),
            };
        }
        Ok(next_version)
    }

    async fn exists(&self, user_id: &UserId) -> Result<bool, DomainError> {
        let result: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM skill_profiles WHERE user_id = $1")
                .bind(user_id.as_str())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| db_error("Failed to check profile existence", e))?;

        Ok(result.0 > 0)
    }
}
