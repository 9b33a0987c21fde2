//! PrepareInterview - grows the profile and picks every topic an interview needs.
//!
//! The whole preparation runs under the user lock on one profile snapshot,
//! which is written back once at the end.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::application::{AdaptationServices, GrowthOutcome};
use crate::domain::adaptation::{LanguageRotation, RotationSession, TopicPick};
use crate::domain::foundation::{CommandMetadata, DomainError};
use crate::domain::interview::{InterviewDuration, InterviewMode, QuestionPlan};
use crate::domain::profile::SkillKind;

#[derive(Debug, Clone, Copy)]
pub struct PrepareInterviewCommand {
    pub duration: InterviewDuration,
    pub mode: InterviewMode,
}

/// Everything the question generator needs for one interview.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewBlueprint {
    pub duration: InterviewDuration,
    pub mode: InterviewMode,
    pub plan: QuestionPlan,
    pub technical: Vec<TopicPick>,
    pub soft: Vec<TopicPick>,
    /// One language per code question.
    pub languages: Vec<String>,
    pub growth: Vec<GrowthOutcome>,
    pub version: u64,
}

pub struct PrepareInterviewHandler {
    services: AdaptationServices,
}

impl PrepareInterviewHandler {
    pub fn new(services: AdaptationServices) -> Self {
        Self { services }
    }

    pub async fn handle(
        &self,
        cmd: PrepareInterviewCommand,
        metadata: CommandMetadata,
    ) -> Result<InterviewBlueprint, DomainError> {
        let _guard = self.services.locks.lock(&metadata.user_id).await;

        let templates = self.services.duration_templates().await?;
        let plan = QuestionPlan::resolve(templates.get(cmd.duration), cmd.mode);
        let criteria = self.services.growth_criteria().await?;
        let mut profile = self.services.load_profile(&metadata.user_id).await?;

        let mut growth = Vec::new();
        let mut technical = Vec::new();
        let mut soft = Vec::new();
        for kind in SkillKind::ALL {
            let count = plan.count(kind) as usize;
            if count == 0 {
                continue;
            }
            growth.push(self.services.grow(&mut profile, kind, &criteria).await?);
            let picks = RotationSession::new(&mut profile, kind, &criteria).select(count);
            match kind {
                SkillKind::Technical => technical = picks,
                SkillKind::Soft => soft = picks,
            }
        }

        let mut languages = Vec::new();
        if plan.code > 0 {
            self.services.detect_languages(&mut profile).await;
            for _ in 0..plan.code {
                languages.extend(LanguageRotation::select(&mut profile, 1));
            }
        }

        let version = self.services.save_profile(&mut profile).await?;
        info!(
            user_id = %metadata.user_id,
            correlation_id = metadata.correlation_id(),
            duration = %cmd.duration,
            technical = technical.len(),
            soft = soft.len(),
            code = languages.len(),
            "Interview prepared"
        );

        Ok(InterviewBlueprint {
            duration: cmd.duration,
            mode: cmd.mode,
            plan,
            technical,
            soft,
            languages,
            growth,
            version,
        })
    }
}
