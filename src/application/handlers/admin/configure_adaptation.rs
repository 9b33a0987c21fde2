//! Admin handlers for the growth criteria and duration templates.

use tracing::info;

use crate::application::AdaptationServices;
use crate::domain::adaptation::GrowthCriteria;
use crate::domain::foundation::{CommandMetadata, DomainError, ErrorCode, ValidationError};
use crate::domain::interview::DurationTemplates;

fn invalid_config(error: ValidationError) -> DomainError {
    DomainError::new(ErrorCode::InvalidConfig, error.to_string())
}

#[derive(Debug, Clone)]
pub struct UpdateGrowthCriteriaCommand {
    pub criteria: GrowthCriteria,
}

/// Validates and replaces the growth-criteria document.
pub struct UpdateGrowthCriteriaHandler {
    services: AdaptationServices,
}

impl UpdateGrowthCriteriaHandler {
    pub fn new(services: AdaptationServices) -> Self {
        Self { services }
    }

    pub async fn handle(
        &self,
        cmd: UpdateGrowthCriteriaCommand,
        metadata: CommandMetadata,
    ) -> Result<GrowthCriteria, DomainError> {
        cmd.criteria.validate().map_err(invalid_config)?;
        self.services.config.save_growth_criteria(&cmd.criteria).await?;
        info!(
            actor = %metadata.user_id,
            reinforcement = cmd.criteria.reinforcement_ratio().is_some(),
            "Growth criteria updated"
        );
        Ok(cmd.criteria)
    }
}

#[derive(Debug, Clone)]
pub struct UpdateDurationTemplatesCommand {
    pub templates: DurationTemplates,
}

/// Validates and replaces the duration templates.
pub struct UpdateDurationTemplatesHandler {
    services: AdaptationServices,
}

impl UpdateDurationTemplatesHandler {
    pub fn new(services: AdaptationServices) -> Self {
        Self { services }
    }

    pub async fn handle(
        &self,
        cmd: UpdateDurationTemplatesCommand,
        metadata: CommandMetadata,
    ) -> Result<DurationTemplates, DomainError> {
        cmd.templates.validate().map_err(invalid_config)?;
        self.services
            .config
            .save_duration_templates(&cmd.templates)
            .await?;
        info!(actor = %metadata.user_id, "Duration templates updated");
        Ok(cmd.templates)
    }
}

/// Both admin documents as currently in effect.
#[derive(Debug, Clone, PartialEq)]
pub struct AdaptationConfigView {
    pub growth_criteria: GrowthCriteria,
    pub duration_templates: DurationTemplates,
}

pub struct GetAdaptationConfigHandler {
    services: AdaptationServices,
}

impl GetAdaptationConfigHandler {
    pub fn new(services: AdaptationServices) -> Self {
        Self { services }
    }

    /// Missing criteria read as inactive; missing templates are stored as defaults.
    pub async fn handle(&self) -> Result<AdaptationConfigView, DomainError> {
        Ok(AdaptationConfigView {
            growth_criteria: self.services.growth_criteria().await?,
            duration_templates: self.services.duration_templates().await?,
        })
    }
}
