//! SelectTopics - Command handler for picking the next interview topics.

use tracing::debug;

use crate::application::AdaptationServices;
use crate::domain::adaptation::{RotationSession, TopicPick};
use crate::domain::foundation::{CommandMetadata, DomainError};
use crate::domain::profile::{RotationMode, SkillKind};

#[derive(Debug, Clone, Copy)]
pub struct SelectTopicsCommand {
    pub kind: SkillKind,
    pub count: usize,
}

#[derive(Debug, Clone)]
pub struct SelectTopicsResult {
    pub picks: Vec<TopicPick>,
    /// Rotation mode of the kind after the last pick.
    pub mode: RotationMode,
    pub version: u64,
}

pub struct SelectTopicsHandler {
    services: AdaptationServices,
}

impl SelectTopicsHandler {
    pub fn new(services: AdaptationServices) -> Self {
        Self { services }
    }

    pub async fn handle(
        &self,
        cmd: SelectTopicsCommand,
        metadata: CommandMetadata,
    ) -> Result<SelectTopicsResult, DomainError> {
        let _guard = self.services.locks.lock(&metadata.user_id).await;
        let mut profile = self.services.load_profile(&metadata.user_id).await?;
        let criteria = self.services.growth_criteria().await?;

        let picks = RotationSession::new(&mut profile, cmd.kind, &criteria).select(cmd.count);
        if picks.is_empty() {
            return Ok(SelectTopicsResult {
                picks,
                mode: profile.mode(cmd.kind),
                version: profile.version(),
            });
        }

        let version = self.services.save_profile(&mut profile).await?;
        debug!(
            user_id = %metadata.user_id,
            kind = %cmd.kind,
            picks = picks.len(),
            "Topics selected"
        );

        Ok(SelectTopicsResult {
            picks,
            mode: profile.mode(cmd.kind),
            version,
        })
    }
}
