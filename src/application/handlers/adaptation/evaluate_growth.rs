//! EvaluateGrowth - Query handler reporting where a profile should grow.

use crate::application::AdaptationServices;
use crate::domain::adaptation::GrowthReport;
use crate::domain::foundation::{CommandMetadata, DomainError};
use crate::domain::profile::SkillKind;

#[derive(Debug, Clone, Copy)]
pub struct EvaluateGrowthQuery {
    pub kind: SkillKind,
}

/// Read-only; nothing is synthesized or saved.
pub struct EvaluateGrowthHandler {
    services: AdaptationServices,
}

impl EvaluateGrowthHandler {
    pub fn new(services: AdaptationServices) -> Self {
        Self { services }
    }

    pub async fn handle(
        &self,
        query: EvaluateGrowthQuery,
        metadata: CommandMetadata,
    ) -> Result<GrowthReport, DomainError> {
        let profile = self.services.load_profile(&metadata.user_id).await?;
        let criteria = self.services.growth_criteria().await?;
        self.services
            .evaluate_growth(&profile, query.kind, &criteria)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{seed_profile, services, skill, ScriptedGenerator};
    use crate::domain::adaptation::{GrowthCriteria, ThresholdCriterion};
    use crate::domain::foundation::ErrorCode;

    #[tokio::test]
    async fn empty_kind_bootstraps_a_skill() {
        let services = services(ScriptedGenerator::new());
        seed_profile(&services, "u1", vec![skill("Teamwork", SkillKind::Soft, &[0])]).await;
        let handler = EvaluateGrowthHandler::new(services);

        let report = handler
            .handle(
                EvaluateGrowthQuery { kind: SkillKind::Technical },
                CommandMetadata::test_fixture("u1"),
            )
            .await
            .unwrap();
        assert!(report.create_skill);
        assert!(report.create_subtopic.is_empty());
    }

    #[tokio::test]
    async fn question_counts_come_from_history() {
        let services = services(ScriptedGenerator::new());
        let profile = seed_profile(
            &services,
            "u1",
            vec![skill("Python", SkillKind::Technical, &[0, 0])],
        )
        .await;
        let mut criteria = GrowthCriteria::inactive();
        criteria.subtopics.question_count = Some(ThresholdCriterion::active(2.0, 0.5));
        services.config.save_growth_criteria(&criteria).await.unwrap();
        for _ in 0..2 {
            services
                .history
                .record(&crate::domain::interview::QuestionRecord::new(
                    profile.user_id().clone(),
                    SkillKind::Technical,
                    "Python",
                    "Python-1",
                ))
                .await
                .unwrap();
        }

        let report = EvaluateGrowthHandler::new(services)
            .handle(
                EvaluateGrowthQuery { kind: SkillKind::Technical },
                CommandMetadata::test_fixture("u1"),
            )
            .await
            .unwrap();
        assert!(!report.create_skill);
        assert_eq!(report.create_subtopic.get("Python"), Some(&true));
    }

    #[tokio::test]
    async fn missing_profile_is_not_found() {
        let err = EvaluateGrowthHandler::new(services(ScriptedGenerator::new()))
            .handle(
                EvaluateGrowthQuery { kind: SkillKind::Soft },
                CommandMetadata::test_fixture("ghost"),
            )
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ProfileNotFound);
    }
}
