//! QuestionHistory port - prior questions asked per (user, skill, subtopic)

use async_trait::async_trait;

use crate::domain::{
    foundation::{DomainError, UserId},
    interview::QuestionRecord,
};

/// Append-only history of asked questions.
#[async_trait]
pub trait QuestionHistory: Send + Sync {
    /// Append a record.
    async fn record(&self, record: &QuestionRecord) -> Result<(), DomainError>;

    /// Number of questions asked to `user_id` about the pair (case-insensitive).
    async fn count(
        &self,
        user_id: &UserId,
        skill: &str,
        subtopic: &str,
    ) -> Result<u64, DomainError>;
}
