//! Growth evaluation and synthesis on an in-memory profile snapshot.
//!
//! These steps are shared by the single-purpose handlers and by interview
//! preparation. They never take the user lock and never save; the calling
//! handler owns both.

use serde::{Deserialize, Serialize};
use std::future::Future;
use tracing::{debug, info, warn};

use super::AdaptationServices;
use crate::domain::adaptation::{
    GrowthCriteria, GrowthPolicy, GrowthReport, LanguageRotation, QuestionTally,
};
use crate::domain::foundation::DomainError;
use crate::domain::profile::{Skill, SkillKind, SkillProfile, Subtopic};
use crate::ports::{GenerationError, SkillRequest, SubtopicRequest};

/// A subtopic added to an existing skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddedSubtopic {
    pub skill: String,
    pub subtopic: String,
}

/// Growth decisions for one kind plus what synthesis actually produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthOutcome {
    pub report: GrowthReport,
    pub skill_added: Option<String>,
    pub subtopics_added: Vec<AddedSubtopic>,
}

impl AdaptationServices {
    /// Runs `call` under the generation timeout.
    async fn bounded<T, F>(&self, call: F) -> Result<T, GenerationError>
    where
        F: Future<Output = Result<T, GenerationError>>,
    {
        match tokio::time::timeout(self.generation_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(GenerationError::Timeout(self.generation_timeout.as_secs())),
        }
    }

    /// Prior question counts for every subtopic of `kind`.
    ///
    /// Skipped entirely when the question-count criterion is inactive.
    pub(crate) async fn question_tally(
        &self,
        profile: &SkillProfile,
        kind: SkillKind,
        criteria: &GrowthCriteria,
    ) -> Result<QuestionTally, DomainError> {
        let mut tally = QuestionTally::new();
        if criteria.subtopic_question_count().is_none() {
            return Ok(tally);
        }
        for skill in profile.skills_of(kind) {
            for subtopic in &skill.subtopics {
                let count = self
                    .history
                    .count(profile.user_id(), &skill.name, &subtopic.name)
                    .await?;
                tally.insert(&skill.name, &subtopic.name, count);
            }
        }
        Ok(tally)
    }

    pub(crate) async fn evaluate_growth(
        &self,
        profile: &SkillProfile,
        kind: SkillKind,
        criteria: &GrowthCriteria,
    ) -> Result<GrowthReport, DomainError> {
        let tally = self.question_tally(profile, kind, criteria).await?;
        let report = GrowthPolicy::evaluate(profile, kind, criteria, &tally);
        debug!(
            user_id = %profile.user_id(),
            kind = %kind,
            create_skill = report.create_skill,
            extend = report.skills_to_extend().count(),
            "Growth evaluated"
        );
        Ok(report)
    }

    /// Asks the generator for a new skill of `kind` and admits it.
    ///
    /// Generator failures, timeouts and unusable output yield `None`.
    pub(crate) async fn synthesize_skill(
        &self,
        profile: &mut SkillProfile,
        kind: SkillKind,
    ) -> Option<Skill> {
        let request = SkillRequest {
            user_id: profile.user_id().clone(),
            kind,
            classification: profile.classification(),
            existing_skills: profile.skill_names(kind),
        };

        let generated = match self.bounded(self.generator.generate_skill(&request)).await {
            Ok(generated) => generated,
            Err(error) => {
                warn!(user_id = %profile.user_id(), kind = %kind, %error, "Skill generation failed");
                return None;
            }
        };

        match profile.admit_skill(kind, &generated.name, &generated.subtopics) {
            Ok(skill) => {
                info!(
                    user_id = %request.user_id,
                    kind = %kind,
                    skill = %skill.name,
                    subtopics = skill.subtopics.len(),
                    "Skill synthesized"
                );
                Some(skill.clone())
            }
            Err(error) => {
                warn!(
                    user_id = %request.user_id,
                    kind = %kind,
                    skill = %generated.name,
                    %error,
                    "Generated skill rejected"
                );
                None
            }
        }
    }

    /// Asks the generator for one more subtopic of `skill_name` and admits it.
    pub(crate) async fn synthesize_subtopic(
        &self,
        profile: &mut SkillProfile,
        kind: SkillKind,
        skill_name: &str,
    ) -> Option<Subtopic> {
        let Some(skill) = profile.skill(kind, skill_name) else {
            debug!(user_id = %profile.user_id(), kind = %kind, skill = skill_name, "No such skill to extend");
            return None;
        };
        let request = SubtopicRequest {
            user_id: profile.user_id().clone(),
            kind,
            classification: profile.classification(),
            skill: skill.name.clone(),
            expected_level: skill.expected_level,
            existing_subtopics: skill.subtopic_names(),
        };

        let generated = match self.bounded(self.generator.generate_subtopic(&request)).await {
            Ok(generated) => generated,
            Err(error) => {
                warn!(
                    user_id = %request.user_id,
                    kind = %kind,
                    skill = %request.skill,
                    %error,
                    "Subtopic generation failed"
                );
                return None;
            }
        };

        match profile.admit_subtopic(kind, &request.skill, &generated.name) {
            Ok(subtopic) => {
                info!(
                    user_id = %request.user_id,
                    kind = %kind,
                    skill = %request.skill,
                    subtopic = %subtopic.name,
                    "Subtopic synthesized"
                );
                Some(subtopic.clone())
            }
            Err(error) => {
                warn!(
                    user_id = %request.user_id,
                    skill = %request.skill,
                    subtopic = %generated.name,
                    %error,
                    "Generated subtopic rejected"
                );
                None
            }
        }
    }

    /// Evaluates growth for `kind` and synthesizes whatever it calls for.
    pub(crate) async fn grow(
        &self,
        profile: &mut SkillProfile,
        kind: SkillKind,
        criteria: &GrowthCriteria,
    ) -> Result<GrowthOutcome, DomainError> {
        let report = self.evaluate_growth(profile, kind, criteria).await?;

        let skill_added = if report.create_skill {
            self.synthesize_skill(profile, kind).await.map(|s| s.name)
        } else {
            None
        };

        let mut subtopics_added = Vec::new();
        for skill in report.skills_to_extend() {
            if let Some(subtopic) = self.synthesize_subtopic(profile, kind, skill).await {
                subtopics_added.push(AddedSubtopic {
                    skill: skill.to_string(),
                    subtopic: subtopic.name,
                });
            }
        }

        Ok(GrowthOutcome {
            report,
            skill_added,
            subtopics_added,
        })
    }

    /// Adds code languages detected from the technical skills.
    ///
    /// Classifier failures leave the profile unchanged.
    pub(crate) async fn detect_languages(&self, profile: &mut SkillProfile) -> Vec<String> {
        let technical = profile.skill_names(SkillKind::Technical);
        if technical.is_empty() {
            return Vec::new();
        }

        let detected = match self
            .bounded(self.classifier.detect_languages(profile.user_id(), &technical))
            .await
        {
            Ok(detected) => detected,
            Err(error) => {
                warn!(user_id = %profile.user_id(), %error, "Language detection failed");
                return Vec::new();
            }
        };

        let added = LanguageRotation::merge_detected(profile, &detected);
        if !added.is_empty() {
            info!(user_id = %profile.user_id(), added = ?added, "Languages detected");
        }
        added
    }
}
