//! GrowProfile - evaluates growth for one kind and synthesizes what it calls for.

use tracing::info;

use crate::application::{AdaptationServices, GrowthOutcome};
use crate::domain::foundation::{CommandMetadata, DomainError};
use crate::domain::profile::SkillKind;

#[derive(Debug, Clone, Copy)]
pub struct GrowProfileCommand {
    pub kind: SkillKind,
}

#[derive(Debug, Clone)]
pub struct GrowProfileResult {
    pub outcome: GrowthOutcome,
    pub version: u64,
}

pub struct GrowProfileHandler {
    services: AdaptationServices,
}

impl GrowProfileHandler {
    pub fn new(services: AdaptationServices) -> Self {
        Self { services }
    }

    pub async fn handle(
        &self,
        cmd: GrowProfileCommand,
        metadata: CommandMetadata,
    ) -> Result<GrowProfileResult, DomainError> {
        let _guard = self.services.locks.lock(&metadata.user_id).await;
        let mut profile = self.services.load_profile(&metadata.user_id).await?;
        let criteria = self.services.growth_criteria().await?;

        let outcome = self.services.grow(&mut profile, cmd.kind, &criteria).await?;

        let changed = outcome.skill_added.is_some() || !outcome.subtopics_added.is_empty();
        let version = if changed {
            let version = self.services.save_profile(&mut profile).await?;
            info!(
                user_id = %metadata.user_id,
                kind = %cmd.kind,
                skill_added = ?outcome.skill_added,
                subtopics_added = outcome.subtopics_added.len(),
                "Profile grown"
            );
            version
        } else {
            profile.version()
        };

        Ok(GrowProfileResult { outcome, version })
    }
}
