//! RecordQuestion - appends an asked question to the history.

use crate::application::AdaptationServices;
use crate::domain::foundation::{CommandMetadata, DomainError, ErrorCode};
use crate::domain::interview::QuestionRecord;
use crate::domain::profile::SkillKind;

/// A question the generator asked about a (skill, subtopic) pair.
#[derive(Debug, Clone)]
pub struct RecordQuestionCommand {
    pub kind: SkillKind,
    pub skill: String,
    pub subtopic: String,
}

pub struct RecordQuestionHandler {
    services: AdaptationServices,
}

impl RecordQuestionHandler {
    pub fn new(services: AdaptationServices) -> Self {
        Self { services }
    }

    /// Records the question under the names stored in the profile.
    pub async fn handle(
        &self,
        cmd: RecordQuestionCommand,
        metadata: CommandMetadata,
    ) -> Result<QuestionRecord, DomainError> {
        let profile = self.services.load_profile(&metadata.user_id).await?;

        let skill = profile.skill(cmd.kind, &cmd.skill).ok_or_else(|| {
            DomainError::new(ErrorCode::SkillNotFound, "Skill not found").with_detail("skill", cmd.skill.clone())
        })?;
        let subtopic = skill.subtopic(&cmd.subtopic).ok_or_else(|| {
            DomainError::new(ErrorCode::SubtopicNotFound, "Subtopic not found")
                .with_detail("subtopic", cmd.subtopic.clone())
        })?;

        let record = QuestionRecord::new(
            metadata.user_id.clone(),
            cmd.kind,
            skill.name.clone(),
            subtopic.name.clone(),
        );
        self.services.history.record(&record).await?;
        Ok(record)
    }
}
