//! ActivateReinforcement - flags the weakest subtopics of a kind on demand.

use tracing::info;

use crate::application::AdaptationServices;
use crate::domain::adaptation::ReinforcementTrigger;
use crate::domain::foundation::{CommandMetadata, DomainError};
use crate::domain::profile::{RotationMode, SkillKind};

#[derive(Debug, Clone, Copy)]
pub struct ActivateReinforcementCommand {
    pub kind: SkillKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActivateReinforcementResult {
    pub flagged: usize,
    pub mode: RotationMode,
    pub version: u64,
}

pub struct ActivateReinforcementHandler {
    services: AdaptationServices,
}

impl ActivateReinforcementHandler {
    pub fn new(services: AdaptationServices) -> Self {
        Self { services }
    }

    pub async fn handle(
        &self,
        cmd: ActivateReinforcementCommand,
        metadata: CommandMetadata,
    ) -> Result<ActivateReinforcementResult, DomainError> {
        let _guard = self.services.locks.lock(&metadata.user_id).await;
        let mut profile = self.services.load_profile(&metadata.user_id).await?;
        let criteria = self.services.growth_criteria().await?;

        // Inactive ratio: the trigger is a no-op and there is nothing to write.
        if criteria.reinforcement_ratio().is_none() {
            return Ok(ActivateReinforcementResult {
                flagged: 0,
                mode: profile.mode(cmd.kind),
                version: profile.version(),
            });
        }

        let flagged = ReinforcementTrigger::maybe_activate(&mut profile, cmd.kind, &criteria);
        let version = self.services.save_profile(&mut profile).await?;
        info!(user_id = %metadata.user_id, kind = %cmd.kind, flagged, "Reinforcement requested");

        Ok(ActivateReinforcementResult {
            flagged,
            mode: profile.mode(cmd.kind),
            version,
        })
    }
}
