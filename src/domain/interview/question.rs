//! Record of a question asked to a user.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{QuestionId, Timestamp, UserId};
use crate::domain::profile::SkillKind;

/// A question asked about a (skill, subtopic) pair.
///
/// Appended by the question generator; counted by growth evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub id: QuestionId,
    pub user_id: UserId,
    pub skill: String,
    pub subtopic: String,
    pub kind: SkillKind,
    pub asked_at: Timestamp,
}

impl QuestionRecord {
    pub fn new(
        user_id: UserId,
        kind: SkillKind,
        skill: impl Into<String>,
        subtopic: impl Into<String>,
    ) -> Self {
        Self {
            id: QuestionId::new(),
            user_id,
            skill: skill.into(),
            subtopic: subtopic.into(),
            kind,
            asked_at: Timestamp::now(),
        }
    }

    /// True if this record is about the given pair, ignoring case.
    pub fn is_about(&self, skill: &str, subtopic: &str) -> bool {
        crate::domain::profile::names_match(&self.skill, skill)
            && crate::domain::profile::names_match(&self.subtopic, subtopic)
    }
}
