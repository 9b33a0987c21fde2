//! Skills and their subtopics.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Whether a skill is technical or soft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillKind {
    Technical,
    Soft,
}

impl SkillKind {
    /// All kinds, in the order interviews ask them.
    pub const ALL: [SkillKind; 2] = [SkillKind::Technical, SkillKind::Soft];

    /// Returns the wire name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillKind::Technical => "technical",
            SkillKind::Soft => "soft",
        }
    }
}

impl fmt::Display for SkillKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SkillKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "technical" => Ok(SkillKind::Technical),
            "soft" => Ok(SkillKind::Soft),
            other => Err(ValidationError::invalid_format(
                "skill kind",
                format!("unknown kind '{}'", other),
            )),
        }
    }
}

/// Level the user is expected to perform at for a skill.
///
/// Flows into question text generation only; selection ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpectedLevel {
    #[default]
    Basic,
    Intermediate,
    Advanced,
}

impl ExpectedLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpectedLevel::Basic => "basic",
            ExpectedLevel::Intermediate => "intermediate",
            ExpectedLevel::Advanced => "advanced",
        }
    }
}

impl fmt::Display for ExpectedLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case- and whitespace-insensitive name comparison used for uniqueness.
pub fn names_match(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// A scoped facet of a skill; the unit actually selected for a question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subtopic {
    pub name: String,
    /// Mastery score, updated as answers are graded.
    #[serde(default)]
    pub score: f64,
    /// Normal-rotation picks received. Reinforcement picks do not count.
    #[serde(default)]
    pub usage_index: u32,
    /// Must be preferred on the next reinforcing pick for this skill's kind.
    #[serde(default)]
    pub reinforce: bool,
}

impl Subtopic {
    /// Creates a fresh subtopic with zero score and usage.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::empty_field("subtopic name"));
        }
        Ok(Self {
            name,
            score: 0.0,
            usage_index: 0,
            reinforce: false,
        })
    }

    /// Builder: set the usage index.
    pub fn with_usage_index(mut self, usage_index: u32) -> Self {
        self.usage_index = usage_index;
        self
    }

    /// Builder: set the score.
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = score;
        self
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::empty_field("subtopic name"));
        }
        if !self.score.is_finite() {
            return Err(ValidationError::invalid_format(
                "score",
                format!("subtopic '{}' has a non-finite score", self.name),
            ));
        }
        Ok(())
    }
}

/// A technical or soft competency tracked per user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub kind: SkillKind,
    #[serde(default)]
    pub expected_level: ExpectedLevel,
    /// Cached sum of the subtopics' usage indices.
    #[serde(default)]
    pub usage_index: u32,
    #[serde(default)]
    pub subtopics: Vec<Subtopic>,
}

impl Skill {
    /// Creates a skill, validating names and computing the usage aggregate.
    pub fn new(
        name: impl Into<String>,
        kind: SkillKind,
        expected_level: ExpectedLevel,
        subtopics: Vec<Subtopic>,
    ) -> Result<Self, ValidationError> {
        let mut skill = Self {
            name: name.into().trim().to_string(),
            kind,
            expected_level,
            usage_index: 0,
            subtopics,
        };
        skill.validate()?;
        skill.recompute_usage();
        Ok(skill)
    }

    /// Only skills with at least one subtopic take part in rotation.
    pub fn is_eligible(&self) -> bool {
        !self.subtopics.is_empty()
    }

    /// Recomputes the cached usage aggregate from the subtopics.
    pub fn recompute_usage(&mut self) {
        self.usage_index = self.subtopics.iter().map(|s| s.usage_index).sum();
    }

    pub fn subtopic(&self, name: &str) -> Option<&Subtopic> {
        self.subtopics.iter().find(|s| names_match(&s.name, name))
    }

    pub fn subtopic_mut(&mut self, name: &str) -> Option<&mut Subtopic> {
        self.subtopics.iter_mut().find(|s| names_match(&s.name, name))
    }

    pub fn subtopic_names(&self) -> Vec<String> {
        self.subtopics.iter().map(|s| s.name.clone()).collect()
    }

    /// Mean subtopic score, `None` when there are no subtopics.
    pub fn mean_score(&self) -> Option<f64> {
        if self.subtopics.is_empty() {
            return None;
        }
        let total: f64 = self.subtopics.iter().map(|s| s.score).sum();
        Some(total / self.subtopics.len() as f64)
    }

    /// Lowest usage index among this skill's subtopics.
    pub fn min_subtopic_usage(&self) -> Option<u32> {
        self.subtopics.iter().map(|s| s.usage_index).min()
    }

    pub fn has_flagged_subtopics(&self) -> bool {
        self.subtopics.iter().any(|s| s.reinforce)
    }

    /// Validates names, uniqueness and score sanity.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::empty_field("skill name"));
        }
        for (i, subtopic) in self.subtopics.iter().enumerate() {
            subtopic.validate()?;
            if self.subtopics[..i]
                .iter()
                .any(|other| names_match(&other.name, &subtopic.name))
            {
                return Err(ValidationError::duplicate("subtopic", subtopic.name.clone()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subtopics(usages: &[u32]) -> Vec<Subtopic> {
        usages
            .iter()
            .enumerate()
            .map(|(i, u)| Subtopic::new(format!("sub-{}", i)).unwrap().with_usage_index(*u))
            .collect()
    }

    #[test]
    fn skill_kind_round_trips_through_strings() {
        assert_eq!("technical".parse::<SkillKind>().unwrap(), SkillKind::Technical);
        assert_eq!(" Soft ".parse::<SkillKind>().unwrap(), SkillKind::Soft);
        assert!("technica".parse::<SkillKind>().is_err());
        assert_eq!(SkillKind::Soft.to_string(), "soft");
    }

    #[test]
    fn skill_kind_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&SkillKind::Technical).unwrap(), "\"technical\"");
    }

    #[test]
    fn new_skill_computes_usage_aggregate() {
        let skill = Skill::new("Rust", SkillKind::Technical, ExpectedLevel::Basic, subtopics(&[1, 2, 3]))
            .unwrap();
        assert_eq!(skill.usage_index, 6);
    }

    #[test]
    fn new_skill_rejects_duplicate_subtopics_ignoring_case() {
        let subs = vec![Subtopic::new("Traits").unwrap(), Subtopic::new("traits ").unwrap()];
        let err = Skill::new("Rust", SkillKind::Technical, ExpectedLevel::Basic, subs).unwrap_err();
        assert!(matches!(err, ValidationError::Duplicate { .. }));
    }

    #[test]
    fn new_skill_rejects_empty_name() {
        let err = Skill::new("  ", SkillKind::Soft, ExpectedLevel::Basic, vec![]).unwrap_err();
        assert!(matches!(err, ValidationError::EmptyField { .. }));
    }

    #[test]
    fn validate_rejects_non_finite_scores() {
        let mut skill =
            Skill::new("Git", SkillKind::Technical, ExpectedLevel::Basic, subtopics(&[0])).unwrap();
        skill.subtopics[0].score = f64::NAN;
        assert!(skill.validate().is_err());
    }

    #[test]
    fn mean_score_averages_subtopics() {
        let subs = vec![
            Subtopic::new("a").unwrap().with_score(4.0),
            Subtopic::new("b").unwrap().with_score(8.0),
        ];
        let skill = Skill::new("SQL", SkillKind::Technical, ExpectedLevel::Basic, subs).unwrap();
        assert_eq!(skill.mean_score(), Some(6.0));
    }

    #[test]
    fn empty_skill_is_not_eligible() {
        let skill = Skill::new("Docker", SkillKind::Technical, ExpectedLevel::Basic, vec![]).unwrap();
        assert!(!skill.is_eligible());
        assert_eq!(skill.mean_score(), None);
        assert_eq!(skill.min_subtopic_usage(), None);
    }

    #[test]
    fn subtopic_lookup_ignores_case() {
        let skill =
            Skill::new("Rust", SkillKind::Technical, ExpectedLevel::Basic, subtopics(&[0, 0])).unwrap();
        assert!(skill.subtopic("SUB-1").is_some());
        assert!(skill.subtopic("sub-7").is_none());
    }

    #[test]
    fn subtopic_defaults_apply_when_deserializing() {
        let sub: Subtopic = serde_json::from_str(r#"{"name":"Closures"}"#).unwrap();
        assert_eq!(sub.usage_index, 0);
        assert_eq!(sub.score, 0.0);
        assert!(!sub.reinforce);
    }
}
