//! CreateSkill - synthesizes one new skill for the acting user.

use crate::application::AdaptationServices;
use crate::domain::foundation::{CommandMetadata, DomainError};
use crate::domain::profile::{Skill, SkillKind};

#[derive(Debug, Clone, Copy)]
pub struct CreateSkillCommand {
    pub kind: SkillKind,
}

pub struct CreateSkillHandler {
    services: AdaptationServices,
}

impl CreateSkillHandler {
    pub fn new(services: AdaptationServices) -> Self {
        Self { services }
    }

    /// Returns the admitted skill, or `None` when generation produced nothing usable.
    pub async fn handle(
        &self,
        cmd: CreateSkillCommand,
        metadata: CommandMetadata,
    ) -> Result<Option<Skill>, DomainError> {
        let _guard = self.services.locks.lock(&metadata.user_id).await;
        let mut profile = self.services.load_profile(&metadata.user_id).await?;

        let skill = self.services.synthesize_skill(&mut profile, cmd.kind).await;
        if skill.is_some() {
            self.services.save_profile(&mut profile).await?;
        }
        Ok(skill)
    }
}
