//! RecordScore - stores a graded mastery score on a subtopic.

use tracing::debug;

use crate::application::AdaptationServices;
use crate::domain::foundation::{CommandMetadata, DomainError};
use crate::domain::profile::SkillKind;

#[derive(Debug, Clone)]
pub struct RecordScoreCommand {
    pub kind: SkillKind,
    pub skill: String,
    pub subtopic: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordScoreResult {
    pub version: u64,
}

pub struct RecordScoreHandler {
    services: AdaptationServices,
}

impl RecordScoreHandler {
    pub fn new(services: AdaptationServices) -> Self {
        Self { services }
    }

    pub async fn handle(
        &self,
        cmd: RecordScoreCommand,
        metadata: CommandMetadata,
    ) -> Result<RecordScoreResult, DomainError> {
        let _guard = self.services.locks.lock(&metadata.user_id).await;
        let mut profile = self.services.load_profile(&metadata.user_id).await?;

        profile.record_score(cmd.kind, &cmd.skill, &cmd.subtopic, cmd.score)?;
        let version = self.services.save_profile(&mut profile).await?;

        debug!(
            user_id = %metadata.user_id,
            kind = %cmd.kind,
            skill = %cmd.skill,
            subtopic = %cmd.subtopic,
            score = cmd.score,
            "Score recorded"
        );
        Ok(RecordScoreResult { version })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{seed_profile, services, skill, ScriptedGenerator};
    use crate::domain::foundation::{ErrorCode, UserId};

    fn command(skill: &str, subtopic: &str, score: f64) -> RecordScoreCommand {
        RecordScoreCommand {
            kind: SkillKind::Technical,
            skill: skill.to_string(),
            subtopic: subtopic.to_string(),
            score,
        }
    }

    #[tokio::test]
    async fn score_is_persisted() {
        let services = services(ScriptedGenerator::new());
        seed_profile(&services, "u1", vec![skill("Python", SkillKind::Technical, &[0, 0])]).await;
        let handler = RecordScoreHandler::new(services.clone());

        let result = handler
            .handle(command("python", "PYTHON-1", 8.5), CommandMetadata::test_fixture("u1"))
            .await
            .unwrap();
        assert_eq!(result.version, 1);

        let stored = services
            .load_profile(&UserId::new("u1").unwrap())
            .await
            .unwrap();
        let python = stored.skill(SkillKind::Technical, "Python").unwrap();
        assert_eq!(python.subtopic("Python-1").unwrap().score, 8.5);
    }

    #[tokio::test]
    async fn unknown_names_are_reported() {
        let services = services(ScriptedGenerator::new());
        seed_profile(&services, "u1", vec![skill("Python", SkillKind::Technical, &[0])]).await;
        let handler = RecordScoreHandler::new(services);

        let err = handler
            .handle(command("Rust", "Traits", 1.0), CommandMetadata::test_fixture("u1"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::SkillNotFound);

        let err = handler
            .handle(command("Python", "Traits", 1.0), CommandMetadata::test_fixture("u1"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::SubtopicNotFound);
    }

    #[tokio::test]
    async fn negative_score_is_rejected() {
        let services = services(ScriptedGenerator::new());
        seed_profile(&services, "u1", vec![skill("Python", SkillKind::Technical, &[0])]).await;
        let handler = RecordScoreHandler::new(services);

        let err = handler
            .handle(command("Python", "Python-0", -1.0), CommandMetadata::test_fixture("u1"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn missing_profile_is_not_found() {
        let handler = RecordScoreHandler::new(services(ScriptedGenerator::new()));
        let err = handler
            .handle(command("Python", "Loops", 1.0), CommandMetadata::test_fixture("ghost"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ProfileNotFound);
    }
}
