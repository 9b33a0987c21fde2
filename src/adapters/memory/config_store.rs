//! In-Memory Adaptation Config Store

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::adaptation::GrowthCriteria;
use crate::domain::foundation::DomainError;
use crate::domain::interview::DurationTemplates;
use crate::ports::AdaptationConfigStore;

#[derive(Debug, Clone, Default)]
pub struct InMemoryConfigStore {
    criteria: Arc<RwLock<Option<GrowthCriteria>>>,
    templates: Arc<RwLock<Option<DurationTemplates>>>,
}

impl InMemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with growth criteria
    pub fn with_criteria(criteria: GrowthCriteria) -> Self {
        Self {
            criteria: Arc::new(RwLock::new(Some(criteria))),
            templates: Arc::default(),
        }
    }
}

#[async_trait]
impl AdaptationConfigStore for InMemoryConfigStore {
    async fn growth_criteria(&self) -> Result<Option<GrowthCriteria>, DomainError> {
        Ok(*self.criteria.read().await)
    }

    async fn save_growth_criteria(&self, criteria: &GrowthCriteria) -> Result<(), DomainError> {
        *self.criteria.write().await = Some(*criteria);
        Ok(())
    }

    async fn duration_templates(&self) -> Result<Option<DurationTemplates>, DomainError> {
        Ok(*self.templates.read().await)
    }

    async fn save_duration_templates(
        &self,
        templates: &DurationTemplates,
    ) -> Result<(), DomainError> {
        *self.templates.write().await = Some(*templates);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::adaptation::RatioCriterion;

    #[tokio::test]
    async fn starts_empty() {
        let store = InMemoryConfigStore::new();
        assert!(store.growth_criteria().await.unwrap().is_none());
        assert!(store.duration_templates().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn saves_and_reads_back() {
        let store = InMemoryConfigStore::new();
        let mut criteria = GrowthCriteria::inactive();
        criteria.subtopics.reinforcement_ratio = Some(RatioCriterion::active(0.2));

        store.save_growth_criteria(&criteria).await.unwrap();
        store
            .save_duration_templates(&DurationTemplates::default())
            .await
            .unwrap();

        assert_eq!(store.growth_criteria().await.unwrap(), Some(criteria));
        assert_eq!(
            store.duration_templates().await.unwrap(),
            Some(DurationTemplates::default())
        );
    }
}
