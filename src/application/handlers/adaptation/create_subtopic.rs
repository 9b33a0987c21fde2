//! CreateSubtopic - synthesizes one more subtopic for an existing skill.

use crate::application::AdaptationServices;
use crate::domain::foundation::{CommandMetadata, DomainError};
use crate::domain::profile::{SkillKind, Subtopic};

#[derive(Debug, Clone)]
pub struct CreateSubtopicCommand {
    pub kind: SkillKind,
    pub skill: String,
}

pub struct CreateSubtopicHandler {
    services: AdaptationServices,
}

impl CreateSubtopicHandler {
    pub fn new(services: AdaptationServices) -> Self {
        Self { services }
    }

    /// Returns `None` when the skill does not exist or generation fails.
    pub async fn handle(
        &self,
        cmd: CreateSubtopicCommand,
        metadata: CommandMetadata,
    ) -> Result<Option<Subtopic>, DomainError> {
        let _guard = self.services.locks.lock(&metadata.user_id).await;
        let mut profile = self.services.load_profile(&metadata.user_id).await?;

        let subtopic = self
            .services
            .synthesize_subtopic(&mut profile, cmd.kind, &cmd.skill)
            .await;
        if subtopic.is_some() {
            self.services.save_profile(&mut profile).await?;
        }
        Ok(subtopic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{seed_profile, services, skill, ScriptedGenerator};
    use crate::domain::foundation::{ErrorCode, UserId};

    fn command(skill: &str) -> CreateSubtopicCommand {
        CreateSubtopicCommand {
            kind: SkillKind::Technical,
            skill: skill.to_string(),
        }
    }

    #[tokio::test]
    async fn subtopic_takes_minimum_sibling_usage() {
        let services = services(ScriptedGenerator::new().with_subtopic("Decorators"));
        seed_profile(&services, "u1", vec![skill("Python", SkillKind::Technical, &[4, 2, 3])]).await;

        let created = CreateSubtopicHandler::new(services.clone())
            .handle(command("Python"), CommandMetadata::test_fixture("u1"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(created.name, "Decorators");
        assert_eq!(created.usage_index, 2);
        assert_eq!(created.score, 0.0);
        assert!(!created.reinforce);

        let stored = services
            .load_profile(&UserId::new("u1").unwrap())
            .await
            .unwrap();
        let python = stored.skill(SkillKind::Technical, "Python").unwrap();
        assert_eq!(python.subtopics.len(), 4);
        assert_eq!(python.usage_index, 11);
    }

    #[tokio::test]
    async fn unknown_skill_yields_none() {
        let services = services(ScriptedGenerator::new().with_subtopic("Decorators"));
        seed_profile(&services, "u1", vec![skill("Python", SkillKind::Technical, &[0])]).await;

        let created = CreateSubtopicHandler::new(services)
            .handle(command("Haskell"), CommandMetadata::test_fixture("u1"))
            .await
            .unwrap();
        assert!(created.is_none());
    }

    #[tokio::test]
    async fn duplicate_generated_name_yields_none() {
        let services = services(ScriptedGenerator::new().with_subtopic("python-0"));
        seed_profile(&services, "u1", vec![skill("Python", SkillKind::Technical, &[0])]).await;

        let created = CreateSubtopicHandler::new(services)
            .handle(command("Python"), CommandMetadata::test_fixture("u1"))
            .await
            .unwrap();
        assert!(created.is_none());
    }

    #[tokio::test]
    async fn missing_profile_is_not_found() {
        let err = CreateSubtopicHandler::new(services(ScriptedGenerator::new()))
            .handle(command("Python"), CommandMetadata::test_fixture("ghost"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ProfileNotFound);
    }
}
