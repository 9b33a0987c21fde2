//! CreateProfile - Command handler for building a profile from a parsed CV.

use tracing::{debug, info};

use crate::application::AdaptationServices;
use crate::domain::foundation::{CommandMetadata, DomainError};
use crate::domain::profile::{
    canonical_language, Classification, ExpectedLevel, Skill, SkillKind, SkillProfile, Subtopic,
};

/// A skill as extracted from the CV.
#[derive(Debug, Clone)]
pub struct SkillSeed {
    pub name: String,
    pub kind: SkillKind,
    pub expected_level: ExpectedLevel,
    pub subtopics: Vec<String>,
}

impl SkillSeed {
    pub fn new(name: impl Into<String>, kind: SkillKind, subtopics: &[&str]) -> Self {
        Self {
            name: name.into(),
            kind,
            expected_level: ExpectedLevel::default(),
            subtopics: subtopics.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn with_level(mut self, level: ExpectedLevel) -> Self {
        self.expected_level = level;
        self
    }

    fn into_skill(self) -> Result<Skill, DomainError> {
        let subtopics = self
            .subtopics
            .into_iter()
            .map(Subtopic::new)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Skill::new(self.name, self.kind, self.expected_level, subtopics)?)
    }
}

/// Command to create the acting user's profile.
#[derive(Debug, Clone)]
pub struct CreateProfileCommand {
    pub classification: Classification,
    pub skills: Vec<SkillSeed>,
    /// Code languages named in the CV.
    pub languages: Vec<String>,
}

/// Result of successful profile creation.
#[derive(Debug, Clone)]
pub struct CreateProfileResult {
    pub profile: SkillProfile,
    /// Languages dropped because the code runner does not support them.
    pub ignored_languages: Vec<String>,
}

pub struct CreateProfileHandler {
    services: AdaptationServices,
}

impl CreateProfileHandler {
    pub fn new(services: AdaptationServices) -> Self {
        Self { services }
    }

    pub async fn handle(
        &self,
        cmd: CreateProfileCommand,
        metadata: CommandMetadata,
    ) -> Result<CreateProfileResult, DomainError> {
        let user_id = metadata.user_id.clone();
        let _guard = self.services.locks.lock(&user_id).await;

        if self.services.profiles.exists(&user_id).await? {
            return Err(DomainError::profile_exists(&user_id));
        }

        let mut profile = SkillProfile::new(user_id.clone(), cmd.classification);
        for seed in cmd.skills {
            profile.add_skill(seed.into_skill()?)?;
        }

        let mut ignored_languages = Vec::new();
        for language in cmd.languages {
            match canonical_language(&language) {
                Some(canonical) => {
                    profile.add_language(canonical);
                }
                None => ignored_languages.push(language),
            }
        }
        if !ignored_languages.is_empty() {
            debug!(user_id = %user_id, ignored = ?ignored_languages, "Unsupported languages ignored");
        }

        self.services.profiles.create(&profile).await?;
        info!(
            user_id = %user_id,
            correlation_id = metadata.correlation_id(),
            classification = %profile.classification(),
            skills = profile.skills().len(),
            languages = profile.languages().len(),
            "Profile created"
        );

        Ok(CreateProfileResult {
            profile,
            ignored_languages,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{services, ScriptedGenerator};
    use crate::domain::foundation::ErrorCode;
    use crate::domain::profile::RotationMode;

    fn command() -> CreateProfileCommand {
        CreateProfileCommand {
            classification: Classification::WithInternships,
            skills: vec![
                SkillSeed::new("Python", SkillKind::Technical, &["Loops", "Classes"])
                    .with_level(ExpectedLevel::Intermediate),
                SkillSeed::new("Teamwork", SkillKind::Soft, &["Conflict resolution"]),
            ],
            languages: vec!["python".to_string(), "Visual FoxPro".to_string()],
        }
    }

    #[tokio::test]
    async fn creates_fresh_profile() {
        let services = services(ScriptedGenerator::new());
        let handler = CreateProfileHandler::new(services.clone());

        let result = handler
            .handle(command(), CommandMetadata::test_fixture("u1"))
            .await
            .unwrap();

        let profile = result.profile;
        assert_eq!(profile.skills().len(), 2);
        assert!(profile
            .skills()
            .iter()
            .flat_map(|s| s.subtopics.iter())
            .all(|t| t.usage_index == 0 && !t.reinforce && t.score == 0.0));
        assert_eq!(profile.mode(SkillKind::Technical), RotationMode::Normal);
        assert_eq!(profile.mode(SkillKind::Soft), RotationMode::Normal);
        assert_eq!(profile.languages()[0].name, "Python");
        assert_eq!(result.ignored_languages, vec!["Visual FoxPro"]);

        assert!(services.profiles.exists(profile.user_id()).await.unwrap());
    }

    #[tokio::test]
    async fn second_profile_for_same_user_fails() {
        let handler = CreateProfileHandler::new(services(ScriptedGenerator::new()));
        handler
            .handle(command(), CommandMetadata::test_fixture("u1"))
            .await
            .unwrap();

        let err = handler
            .handle(command(), CommandMetadata::test_fixture("u1"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ProfileAlreadyExists);
    }

    #[tokio::test]
    async fn duplicate_skill_names_are_rejected() {
        let handler = CreateProfileHandler::new(services(ScriptedGenerator::new()));
        let cmd = CreateProfileCommand {
            classification: Classification::Unknown,
            skills: vec![
                SkillSeed::new("Python", SkillKind::Technical, &["Loops"]),
                SkillSeed::new(" python ", SkillKind::Technical, &["Classes"]),
            ],
            languages: vec![],
        };

        let err = handler
            .handle(cmd, CommandMetadata::test_fixture("u1"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::DuplicateSkill);
    }

    #[tokio::test]
    async fn blank_subtopic_is_a_validation_error() {
        let handler = CreateProfileHandler::new(services(ScriptedGenerator::new()));
        let cmd = CreateProfileCommand {
            classification: Classification::Unknown,
            skills: vec![SkillSeed::new("Python", SkillKind::Technical, &["  "])],
            languages: vec![],
        };

        let err = handler
            .handle(cmd, CommandMetadata::test_fixture("u1"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }
}
