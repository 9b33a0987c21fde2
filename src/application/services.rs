//! Shared handler context: ports, per-user locks and engine settings.

use std::sync::Arc;
use std::time::Duration;

use crate::adapters::ai::{MockAIProvider, OpenAIProvider};
use crate::adapters::generation::LlmMaterialGenerator;
use crate::adapters::memory::{
    InMemoryConfigStore, InMemoryProfileRepository, InMemoryQuestionHistory,
};
use crate::adapters::postgres::{
    self, PostgresConfigStore, PostgresProfileRepository, PostgresQuestionHistory,
};
use crate::adapters::storage::{FileConfigStore, FileProfileRepository, FileQuestionHistory};
use crate::config::{AiProvider, AppConfig, StorageBackend};
use crate::domain::adaptation::GrowthCriteria;
use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::interview::DurationTemplates;
use crate::domain::profile::SkillProfile;
use crate::ports::{
    AIProvider, AdaptationConfigStore, LanguageClassifier, MaterialGenerator, ProfileRepository,
    QuestionHistory,
};

use super::UserLocks;

const DEFAULT_GENERATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Everything the handlers need, cheap to clone.
#[derive(Clone)]
pub struct AdaptationServices {
    pub(crate) profiles: Arc<dyn ProfileRepository>,
    pub(crate) config: Arc<dyn AdaptationConfigStore>,
    pub(crate) history: Arc<dyn QuestionHistory>,
    pub(crate) generator: Arc<dyn MaterialGenerator>,
    pub(crate) classifier: Arc<dyn LanguageClassifier>,
    pub(crate) locks: UserLocks,
    pub(crate) generation_timeout: Duration,
}

impl AdaptationServices {
    pub fn new(
        profiles: Arc<dyn ProfileRepository>,
        config: Arc<dyn AdaptationConfigStore>,
        history: Arc<dyn QuestionHistory>,
        generator: Arc<dyn MaterialGenerator>,
        classifier: Arc<dyn LanguageClassifier>,
    ) -> Self {
        Self {
            profiles,
            config,
            history,
            generator,
            classifier,
            locks: UserLocks::new(),
            generation_timeout: DEFAULT_GENERATION_TIMEOUT,
        }
    }

    pub fn with_generation_timeout(mut self, timeout: Duration) -> Self {
        self.generation_timeout = timeout;
        self
    }

    /// Wires adapters according to `config`.
    ///
    /// Connects to PostgreSQL (and migrates) when that backend is selected.
    pub async fn from_config(config: &AppConfig) -> Result<Self, DomainError> {
        let provider: Arc<dyn AIProvider> = match config.ai.provider {
            AiProvider::OpenAI => {
                let settings = config.ai.openai().ok_or_else(|| {
                    DomainError::new(ErrorCode::InvalidConfig, "OpenAI API key is not set")
                })?;
                let provider = OpenAIProvider::new(settings)
                    .map_err(|e| DomainError::new(ErrorCode::InvalidConfig, e.to_string()))?;
                Arc::new(provider)
            }
            AiProvider::Mock => Arc::new(MockAIProvider::new()),
        };
        let generator = Arc::new(LlmMaterialGenerator::new(provider));

        let (profiles, store, history): (
            Arc<dyn ProfileRepository>,
            Arc<dyn AdaptationConfigStore>,
            Arc<dyn QuestionHistory>,
        ) = match config.storage.backend {
            StorageBackend::Memory => (
                Arc::new(InMemoryProfileRepository::new()),
                Arc::new(InMemoryConfigStore::new()),
                Arc::new(InMemoryQuestionHistory::new()),
            ),
            StorageBackend::File => {
                let dir = &config.storage.data_dir;
                (
                    Arc::new(FileProfileRepository::new(dir)),
                    Arc::new(FileConfigStore::new(dir)),
                    Arc::new(FileQuestionHistory::new(dir)),
                )
            }
            StorageBackend::Postgres => {
                let database = config.storage.database.as_ref().ok_or_else(|| {
                    DomainError::new(ErrorCode::InvalidConfig, "Database settings are missing")
                })?;
                let pool = postgres::connect(database).await?;
                (
                    Arc::new(PostgresProfileRepository::new(pool.clone())),
                    Arc::new(PostgresConfigStore::new(pool.clone())),
                    Arc::new(PostgresQuestionHistory::new(pool)),
                )
            }
        };

        Ok(Self::new(profiles, store, history, generator.clone(), generator)
            .with_generation_timeout(config.engine.generation_timeout()))
    }

    /// Loads the profile of `user_id` or fails with `ProfileNotFound`.
    pub(crate) async fn load_profile(&self, user_id: &UserId) -> Result<SkillProfile, DomainError> {
        self.profiles
            .find_by_user(user_id)
            .await?
            .ok_or_else(|| DomainError::profile_not_found(user_id))
    }

    /// Stamps and persists a mutated snapshot; returns the new version.
    pub(crate) async fn save_profile(&self, profile: &mut SkillProfile) -> Result<u64, DomainError> {
        profile.touch();
        let version = self.profiles.save(profile).await?;
        profile.set_version(version);
        Ok(version)
    }

    /// Stored criteria, or all-inactive when none were ever saved.
    pub(crate) async fn growth_criteria(&self) -> Result<GrowthCriteria, DomainError> {
        Ok(self.config.growth_criteria().await?.unwrap_or_default())
    }

    /// Stored templates; the defaults are written on first read.
    pub(crate) async fn duration_templates(&self) -> Result<DurationTemplates, DomainError> {
        if let Some(templates) = self.config.duration_templates().await? {
            return Ok(templates);
        }
        let defaults = DurationTemplates::default();
        self.config.save_duration_templates(&defaults).await?;
        Ok(defaults)
    }
}
