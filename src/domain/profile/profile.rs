//! SkillProfile aggregate - the per-user document the engine rotates over.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::skill::names_match;
use super::{Language, ReinforcementState, RotationMode, Skill, SkillKind, Subtopic};
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId, ValidationError};

/// Experience pathway of the user, assigned once when the profile is created.
///
/// Only used as context for material synthesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Academic,
    WithInternships,
    SelfTaught,
    Bootcamp,
    TechnicalSchool,
    Mixed,
    #[default]
    Unknown,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Academic => "academic",
            Classification::WithInternships => "with_internships",
            Classification::SelfTaught => "self_taught",
            Classification::Bootcamp => "bootcamp",
            Classification::TechnicalSchool => "technical_school",
            Classification::Mixed => "mixed",
            Classification::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-user aggregate of skills, languages and rotation state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillProfile {
    user_id: UserId,
    #[serde(default)]
    classification: Classification,
    #[serde(default)]
    skills: Vec<Skill>,
    #[serde(default)]
    reinforcement: ReinforcementState,
    #[serde(default)]
    languages: Vec<Language>,
    #[serde(default)]
    version: u64,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl SkillProfile {
    /// Creates an empty profile in normal rotation for every kind.
    pub fn new(user_id: UserId, classification: Classification) -> Self {
        let now = Timestamp::now();
        Self {
            user_id,
            classification,
            skills: Vec::new(),
            reinforcement: ReinforcementState::default(),
            languages: Vec::new(),
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    // ---------------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------------

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn classification(&self) -> Classification {
        self.classification
    }

    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    pub fn skills_of(&self, kind: SkillKind) -> impl Iterator<Item = &Skill> {
        self.skills.iter().filter(move |s| s.kind == kind)
    }

    pub fn skill_names(&self, kind: SkillKind) -> Vec<String> {
        self.skills_of(kind).map(|s| s.name.clone()).collect()
    }

    pub fn skill(&self, kind: SkillKind, name: &str) -> Option<&Skill> {
        self.skills_of(kind).find(|s| names_match(&s.name, name))
    }

    pub fn languages(&self) -> &[Language] {
        &self.languages
    }

    pub fn reinforcement(&self) -> &ReinforcementState {
        &self.reinforcement
    }

    pub fn mode(&self, kind: SkillKind) -> RotationMode {
        self.reinforcement.mode(kind)
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ---------------------------------------------------------------------
    // Crate-internal mutation used by rotation and storage
    // ---------------------------------------------------------------------

    pub(crate) fn skills_mut(&mut self) -> &mut [Skill] {
        &mut self.skills
    }

    pub(crate) fn skill_mut(&mut self, kind: SkillKind, name: &str) -> Option<&mut Skill> {
        self.skills
            .iter_mut()
            .find(|s| s.kind == kind && names_match(&s.name, name))
    }

    pub(crate) fn languages_mut(&mut self) -> &mut Vec<Language> {
        &mut self.languages
    }

    pub(crate) fn set_mode(&mut self, kind: SkillKind, mode: RotationMode) {
        self.reinforcement.set_mode(kind, mode);
    }

    /// Sets the stored version; repositories call this after a successful save.
    pub(crate) fn set_version(&mut self, version: u64) {
        self.version = version;
    }

    /// Marks the profile as modified now.
    pub fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }

    // ---------------------------------------------------------------------
    // Usage queries
    // ---------------------------------------------------------------------

    /// Lowest skill-level usage index among skills of `kind`.
    pub fn min_skill_usage(&self, kind: SkillKind) -> Option<u32> {
        self.skills_of(kind).map(|s| s.usage_index).min()
    }

    /// Lowest usage index across every subtopic of every skill of `kind`.
    pub fn min_subtopic_usage(&self, kind: SkillKind) -> Option<u32> {
        self.skills_of(kind)
            .flat_map(|s| s.subtopics.iter().map(|t| t.usage_index))
            .min()
    }

    /// True if any subtopic of `kind` is still flagged for reinforcement.
    pub fn has_flagged_subtopics(&self, kind: SkillKind) -> bool {
        self.skills_of(kind).any(Skill::has_flagged_subtopics)
    }

    /// Recomputes the usage aggregate of every skill of `kind`.
    pub fn recompute_usage(&mut self, kind: SkillKind) {
        for skill in self.skills.iter_mut().filter(|s| s.kind == kind) {
            skill.recompute_usage();
        }
    }

    // ---------------------------------------------------------------------
    // Commands
    // ---------------------------------------------------------------------

    /// Adds a skill as supplied (used when the profile is first built).
    pub fn add_skill(&mut self, skill: Skill) -> Result<(), DomainError> {
        skill.validate()?;
        if self.skill(skill.kind, &skill.name).is_some() {
            return Err(DomainError::new(ErrorCode::DuplicateSkill, "Skill already exists")
                .with_detail("skill", skill.name.clone())
                .with_detail("kind", skill.kind.to_string()));
        }
        self.skills.push(skill);
        Ok(())
    }

    /// Adds a language if not already present. Returns true when added.
    pub fn add_language(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.languages.iter().any(|l| names_match(&l.name, name)) {
            return false;
        }
        self.languages.push(Language::new(name));
        true
    }

    /// Admits a synthesized skill so it enters rotation without head start or penalty.
    ///
    /// The skill takes the lowest skill usage index of its kind and every
    /// subtopic takes the lowest subtopic usage index of the kind.
    pub fn admit_skill(
        &mut self,
        kind: SkillKind,
        name: &str,
        subtopic_names: &[String],
    ) -> Result<&Skill, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::empty_field("skill name").into());
        }
        if self.skill(kind, name).is_some() {
            return Err(DomainError::new(ErrorCode::DuplicateSkill, "Skill already exists")
                .with_detail("skill", name)
                .with_detail("kind", kind.to_string()));
        }

        let skill_usage = self.min_skill_usage(kind).unwrap_or(0);
        let subtopic_usage = self.min_subtopic_usage(kind).unwrap_or(0);

        let mut subtopics: Vec<Subtopic> = Vec::new();
        for raw in subtopic_names {
            let Ok(subtopic) = Subtopic::new(raw.as_str()) else {
                continue;
            };
            if subtopics.iter().any(|s| names_match(&s.name, &subtopic.name)) {
                continue;
            }
            subtopics.push(subtopic.with_usage_index(subtopic_usage));
        }
        if subtopics.is_empty() {
            return Err(DomainError::validation(
                "subtopics",
                "A new skill needs at least one subtopic",
            ));
        }

        self.skills.push(Skill {
            name: name.to_string(),
            kind,
            expected_level: Default::default(),
            usage_index: skill_usage,
            subtopics,
        });
        let index = self.skills.len() - 1;
        Ok(&self.skills[index])
    }

    /// Admits a synthesized subtopic at the lowest usage index among its siblings.
    ///
    /// A skill without subtopics falls back to the lowest subtopic usage of its kind.
    pub fn admit_subtopic(
        &mut self,
        kind: SkillKind,
        skill_name: &str,
        subtopic_name: &str,
    ) -> Result<&Subtopic, DomainError> {
        let kind_minimum = self.min_subtopic_usage(kind).unwrap_or(0);
        let skill = self.skill_mut(kind, skill_name).ok_or_else(|| {
            DomainError::new(ErrorCode::SkillNotFound, "Skill not found")
                .with_detail("skill", skill_name)
                .with_detail("kind", kind.to_string())
        })?;

        let subtopic = Subtopic::new(subtopic_name)?;
        if skill.subtopic(&subtopic.name).is_some() {
            return Err(DomainError::new(ErrorCode::DuplicateSubtopic, "Subtopic already exists")
                .with_detail("skill", skill.name.clone())
                .with_detail("subtopic", subtopic.name));
        }

        let usage = skill.min_subtopic_usage().unwrap_or(kind_minimum);
        skill.subtopics.push(subtopic.with_usage_index(usage));
        skill.recompute_usage();
        let index = skill.subtopics.len() - 1;
        Ok(&skill.subtopics[index])
    }

    /// Records a graded mastery score for a subtopic.
    pub fn record_score(
        &mut self,
        kind: SkillKind,
        skill_name: &str,
        subtopic_name: &str,
        score: f64,
    ) -> Result<(), DomainError> {
        if !score.is_finite() || score < 0.0 {
            return Err(DomainError::validation(
                "score",
                "Score must be a finite, non-negative number",
            ));
        }
        let skill = self.skill_mut(kind, skill_name).ok_or_else(|| {
            DomainError::new(ErrorCode::SkillNotFound, "Skill not found").with_detail("skill", skill_name)
        })?;
        let subtopic = skill.subtopic_mut(subtopic_name).ok_or_else(|| {
            DomainError::new(ErrorCode::SubtopicNotFound, "Subtopic not found")
                .with_detail("subtopic", subtopic_name)
        })?;
        subtopic.score = score;
        Ok(())
    }

    /// Validates a loaded document; violations are data-integrity errors.
    pub fn validate(&self) -> Result<(), DomainError> {
        for (i, skill) in self.skills.iter().enumerate() {
            skill.validate().map_err(|e| {
                DomainError::malformed(format!("Invalid skill in profile: {}", e))
                    .with_detail("user_id", self.user_id.to_string())
            })?;
            let duplicate = self.skills[..i]
                .iter()
                .any(|other| other.kind == skill.kind && names_match(&other.name, &skill.name));
            if duplicate {
                return Err(DomainError::malformed(format!(
                    "Duplicate {} skill '{}'",
                    skill.kind, skill.name
                ))
                .with_detail("user_id", self.user_id.to_string()));
            }
        }
        for (i, language) in self.languages.iter().enumerate() {
            if language.name.trim().is_empty() {
                return Err(DomainError::malformed("Language name cannot be empty"));
            }
            if self.languages[..i]
                .iter()
                .any(|other| names_match(&other.name, &language.name))
            {
                return Err(DomainError::malformed(format!(
                    "Duplicate language '{}'",
                    language.name
                )));
            }
        }
        Ok(())
    }
}
