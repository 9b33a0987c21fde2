//! Growth Policy - decides when new skills or subtopics should be synthesized.
//!
//! Pure over the profile, the criteria document and pre-fetched question
//! counts. Callers gather the counts first so evaluation never touches I/O.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::GrowthCriteria;
use crate::domain::profile::{Skill, SkillKind, SkillProfile};

/// Prior question counts keyed by (skill, subtopic).
///
/// Names are compared case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionTally {
    counts: HashMap<(String, String), u64>,
}

impl QuestionTally {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(skill: &str, subtopic: &str) -> (String, String) {
        (skill.trim().to_lowercase(), subtopic.trim().to_lowercase())
    }

    pub fn insert(&mut self, skill: &str, subtopic: &str, count: u64) {
        self.counts.insert(Self::key(skill, subtopic), count);
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, skill: &str, subtopic: &str, count: u64) -> Self {
        self.insert(skill, subtopic, count);
        self
    }

    /// Questions asked so far; zero when never recorded.
    pub fn count(&self, skill: &str, subtopic: &str) -> u64 {
        self.counts
            .get(&Self::key(skill, subtopic))
            .copied()
            .unwrap_or(0)
    }
}

/// Both growth decisions for one kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthReport {
    pub kind: SkillKind,
    pub create_skill: bool,
    /// Skill name -> whether it should get a new subtopic.
    pub create_subtopic: BTreeMap<String, bool>,
}

impl GrowthReport {
    /// Skills marked for a new subtopic, in name order.
    pub fn skills_to_extend(&self) -> impl Iterator<Item = &str> {
        self.create_subtopic
            .iter()
            .filter(|(_, grow)| **grow)
            .map(|(name, _)| name.as_str())
    }
}

/// Stateless growth evaluator.
pub struct GrowthPolicy;

impl GrowthPolicy {
    /// Runs both decisions for `kind`.
    pub fn evaluate(
        profile: &SkillProfile,
        kind: SkillKind,
        criteria: &GrowthCriteria,
        tally: &QuestionTally,
    ) -> GrowthReport {
        GrowthReport {
            kind,
            create_skill: Self::should_create_skill(profile, kind, criteria),
            create_subtopic: Self::should_create_subtopic(profile, kind, criteria, tally),
        }
    }

    /// True when a new skill of `kind` should be synthesized.
    ///
    /// A profile with no skills of the kind always grows, whatever the config says.
    pub fn should_create_skill(
        profile: &SkillProfile,
        kind: SkillKind,
        criteria: &GrowthCriteria,
    ) -> bool {
        let skills: Vec<&Skill> = profile.skills_of(kind).collect();
        if skills.is_empty() {
            return true;
        }

        let dominance = criteria.skill_dominance().map(|(value, percentage)| {
            let satisfied = skills
                .iter()
                .filter(|s| s.mean_score().is_some_and(|mean| mean >= value))
                .count();
            percentage.is_reached_by(satisfied, skills.len())
        });

        let breadth = criteria.skill_subtopic_count().map(|(value, percentage)| {
            let satisfied = skills
                .iter()
                .filter(|s| s.subtopics.len() as f64 >= value)
                .count();
            percentage.is_reached_by(satisfied, skills.len())
        });

        dominance.unwrap_or(false) || breadth.unwrap_or(false)
    }

    /// Maps each skill of `kind` with at least one subtopic to whether it
    /// should receive a new subtopic.
    pub fn should_create_subtopic(
        profile: &SkillProfile,
        kind: SkillKind,
        criteria: &GrowthCriteria,
        tally: &QuestionTally,
    ) -> BTreeMap<String, bool> {
        let dominance = criteria.subtopic_dominance();
        let questions = criteria.subtopic_question_count();

        profile
            .skills_of(kind)
            .filter(|s| s.is_eligible())
            .map(|skill| {
                let total = skill.subtopics.len();

                let dominant = dominance.is_some_and(|(value, percentage)| {
                    let satisfied = skill.subtopics.iter().filter(|t| t.score >= value).count();
                    percentage.is_reached_by(satisfied, total)
                });
                let practiced = questions.is_some_and(|(value, percentage)| {
                    let satisfied = skill
                        .subtopics
                        .iter()
                        .filter(|t| tally.count(&skill.name, &t.name) as f64 >= value)
                        .count();
                    percentage.is_reached_by(satisfied, total)
                });

                (skill.name.clone(), dominant || practiced)
            })
            .collect()
    }
}
