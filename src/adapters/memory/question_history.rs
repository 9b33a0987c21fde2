//! In-Memory Question History

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::interview::QuestionRecord;
use crate::ports::QuestionHistory;

#[derive(Debug, Clone, Default)]
pub struct InMemoryQuestionHistory {
    records: Arc<RwLock<Vec<QuestionRecord>>>,
}

impl InMemoryQuestionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn record_count(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl QuestionHistory for InMemoryQuestionHistory {
    async fn record(&self, record: &QuestionRecord) -> Result<(), DomainError> {
        self.records.write().await.push(record.clone());
        Ok(())
    }

    async fn count(
        &self,
        user_id: &UserId,
        skill: &str,
        subtopic: &str,
    ) -> Result<u64, DomainError> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|r| &r.user_id == user_id && r.is_about(skill, subtopic))
            .count() as u64)
    }
}
