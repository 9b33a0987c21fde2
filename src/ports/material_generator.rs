//! Material generation ports - synthesizing skills, subtopics and languages.
//!
//! Generators produce raw names only. Admission rules (usage indices,
//! duplicate checks) belong to the profile aggregate, so a generator that
//! returns a duplicate is not an error here, merely unusable output.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::AIError;
use crate::domain::{
    foundation::UserId,
    profile::{Classification, ExpectedLevel, SkillKind},
};

/// Request for a brand-new skill of `kind`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillRequest {
    pub user_id: UserId,
    pub kind: SkillKind,
    pub classification: Classification,
    /// Skill names of this kind the user already has; must not be repeated.
    pub existing_skills: Vec<String>,
}

/// Generated skill with its foundational subtopics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedSkill {
    pub name: String,
    pub subtopics: Vec<String>,
}

/// Request for one new subtopic of an existing skill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubtopicRequest {
    pub user_id: UserId,
    pub kind: SkillKind,
    pub classification: Classification,
    pub skill: String,
    pub expected_level: ExpectedLevel,
    pub existing_subtopics: Vec<String>,
}

/// Generated subtopic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedSubtopic {
    pub name: String,
}

/// Errors from generation collaborators.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("provider error: {0}")]
    Provider(#[from] AIError),

    #[error("malformed generator output: {0}")]
    Malformed(String),

    #[error("generator returned no usable content")]
    Empty,

    #[error("generation timed out after {0}s")]
    Timeout(u64),
}

impl GenerationError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed(message.into())
    }
}

/// Port for synthesizing new skills and subtopics.
#[async_trait]
pub trait MaterialGenerator: Send + Sync {
    async fn generate_skill(&self, request: &SkillRequest) -> Result<GeneratedSkill, GenerationError>;

    async fn generate_subtopic(
        &self,
        request: &SubtopicRequest,
    ) -> Result<GeneratedSubtopic, GenerationError>;
}

/// Port for mapping technical skills to code-challenge languages.
#[async_trait]
pub trait LanguageClassifier: Send + Sync {
    /// Returns language names; callers filter them against the supported set.
    async fn detect_languages(
        &self,
        user_id: &UserId,
        technical_skills: &[String],
    ) -> Result<Vec<String>, GenerationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_errors_convert() {
        let err: GenerationError = AIError::network("reset").into();
        assert!(matches!(err, GenerationError::Provider(AIError::Network(_))));
        assert!(err.to_string().contains("network error"));
    }

    #[test]
    fn generated_skill_deserializes_from_json() {
        let skill: GeneratedSkill =
            serde_json::from_str(r#"{"name":"Git","subtopics":["Branches","Rebase"]}"#).unwrap();
        assert_eq!(skill.subtopics.len(), 2);
    }
}
