//! File-based Adaptation Config Store
//!
//! Keeps `growth_criteria.yaml` and `duration_templates.yaml` under
//! `<base>/config/`.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::adaptation::GrowthCriteria;
use crate::domain::foundation::DomainError;
use crate::domain::interview::DurationTemplates;
use crate::ports::AdaptationConfigStore;

const GROWTH_CRITERIA_FILE: &str = "growth_criteria.yaml";
const DURATION_TEMPLATES_FILE: &str = "duration_templates.yaml";

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    base_path: PathBuf,
}

impl FileConfigStore {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    fn config_dir(&self) -> PathBuf {
        self.base_path.join("config")
    }

    async fn load<T: DeserializeOwned>(&self, file: &str) -> Result<Option<T>, DomainError> {
        let path = self.config_dir().join(file);
        let yaml = match fs::read_to_string(&path).await {
            Ok(yaml) => yaml,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(DomainError::database(format!("Failed to read {}: {}", file, e))),
        };

        serde_yaml::from_str(&yaml)
            .map(Some)
            .map_err(|e| DomainError::malformed(format!("Invalid {}: {}", file, e)))
    }

    async fn store<T: Serialize>(&self, file: &str, value: &T) -> Result<(), DomainError> {
        let dir = self.config_dir();
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        let yaml = serde_yaml::to_string(value)
            .map_err(|e| DomainError::database(format!("Failed to serialize {}: {}", file, e)))?;
        fs::write(dir.join(file), yaml)
            .await
            .map_err(|e| DomainError::database(e.to_string()))
    }
}

#[async_trait]
impl AdaptationConfigStore for FileConfigStore {
    async fn growth_criteria(&self) -> Result<Option<GrowthCriteria>, DomainError> {
        self.load(GROWTH_CRITERIA_FILE).await
    }

    async fn save_growth_criteria(&self, criteria: &GrowthCriteria) -> Result<(), DomainError> {
        self.store(GROWTH_CRITERIA_FILE, criteria).await
    }

    async fn duration_templates(&self) -> Result<Option<DurationTemplates>, DomainError> {
        self.load(DURATION_TEMPLATES_FILE).await
    }

    async fn save_duration_templates(
        &self,
        templates: &DurationTemplates,
    ) -> Result<(), DomainError> {
        self.store(DURATION_TEMPLATES_FILE, templates).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::adaptation::{RatioCriterion, ThresholdCriterion};
    use tempfile::TempDir;

    #[tokio::test]
    async fn missing_files_read_as_none() {
        let dir = TempDir::new().unwrap();
        let store = FileConfigStore::new(dir.path());
        assert!(store.growth_criteria().await.unwrap().is_none());
        assert!(store.duration_templates().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn criteria_survive_a_reload() {
        let dir = TempDir::new().unwrap();
        let mut criteria = GrowthCriteria::inactive();
        criteria.skills.dominance_threshold = Some(ThresholdCriterion::active(7.0, 0.8));
        criteria.subtopics.reinforcement_ratio = Some(RatioCriterion::active(0.25));

        FileConfigStore::new(dir.path())
            .save_growth_criteria(&criteria)
            .await
            .unwrap();

        let reloaded = FileConfigStore::new(dir.path());
        assert_eq!(reloaded.growth_criteria().await.unwrap(), Some(criteria));
    }

    #[tokio::test]
    async fn partial_criteria_document_is_accepted() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("config")).unwrap();
        std::fs::write(
            dir.path().join("config").join(GROWTH_CRITERIA_FILE),
            "subtopics:\n  question_count:\n    value: 3\n",
        )
        .unwrap();

        let criteria = FileConfigStore::new(dir.path())
            .growth_criteria()
            .await
            .unwrap()
            .unwrap();
        assert!(criteria.subtopic_question_count().is_none());
        assert!(criteria.skill_dominance().is_none());
    }

    #[tokio::test]
    async fn templates_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = FileConfigStore::new(dir.path());
        store
            .save_duration_templates(&DurationTemplates::default())
            .await
            .unwrap();
        assert_eq!(
            store.duration_templates().await.unwrap(),
            Some(DurationTemplates::default())
        );
    }
}
