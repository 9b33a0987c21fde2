//! Admin-tunable growth criteria.
//!
//! Stored documents are read leniently: every criterion and every key is
//! optional, and anything missing or incomplete simply counts as inactive.
//! Strict checks only run when an administrator submits an edit.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Percentage, ValidationError};

/// Default share of subtopics flagged by a reinforcement pass.
pub const DEFAULT_REINFORCEMENT_RATIO: f64 = 0.1;

/// "At least `percentage` of the population has a metric >= `value`".
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ThresholdCriterion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl ThresholdCriterion {
    /// Creates an active criterion.
    pub fn active(value: f64, percentage: f64) -> Self {
        Self {
            value: Some(value),
            percentage: Some(percentage),
            active: Some(true),
        }
    }

    /// Returns `(value, percentage)` when the criterion takes part in evaluation.
    pub fn threshold(&self) -> Option<(f64, Percentage)> {
        if self.active != Some(true) {
            return None;
        }
        let value = self.value.filter(|v| v.is_finite())?;
        let percentage = Percentage::new(self.percentage.unwrap_or(1.0));
        Some((value, percentage))
    }

    fn validate(&self, field: &str) -> Result<(), ValidationError> {
        if let Some(value) = self.value {
            if !value.is_finite() || value < 0.0 {
                return Err(ValidationError::invalid_format(
                    format!("{}.value", field),
                    format!("must be a non-negative number, got {}", value),
                ));
            }
        }
        if let Some(percentage) = self.percentage {
            Percentage::try_new(percentage)?;
        }
        if self.active == Some(true) && self.value.is_none() {
            return Err(ValidationError::empty_field(format!("{}.value", field)));
        }
        Ok(())
    }
}

/// Share of each skill's subtopics flagged when reinforcement triggers.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RatioCriterion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl RatioCriterion {
    pub fn active(percentage: f64) -> Self {
        Self {
            percentage: Some(percentage),
            active: Some(true),
        }
    }

    /// Returns the ratio when reinforcement is enabled.
    pub fn ratio(&self) -> Option<Percentage> {
        if self.active != Some(true) {
            return None;
        }
        Some(Percentage::new(
            self.percentage.unwrap_or(DEFAULT_REINFORCEMENT_RATIO),
        ))
    }

    fn validate(&self, field: &str) -> Result<(), ValidationError> {
        if let Some(percentage) = self.percentage {
            Percentage::try_new(percentage).map_err(|_| {
                ValidationError::invalid_format(
                    format!("{}.percentage", field),
                    format!("expected a fraction between 0.0 and 1.0, got {}", percentage),
                )
            })?;
        }
        Ok(())
    }
}

/// Criteria deciding when a new skill should be synthesized.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SkillCriteria {
    /// Mean subtopic score of a skill >= value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dominance_threshold: Option<ThresholdCriterion>,
    /// Subtopic count of a skill >= value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtopic_count: Option<ThresholdCriterion>,
}

/// Criteria deciding when a skill should get a new subtopic, plus reinforcement.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SubtopicCriteria {
    /// Subtopic score >= value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dominance_threshold: Option<ThresholdCriterion>,
    /// Prior questions on a subtopic >= value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_count: Option<ThresholdCriterion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reinforcement_ratio: Option<RatioCriterion>,
}

/// The full growth-criteria document.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GrowthCriteria {
    #[serde(default)]
    pub skills: SkillCriteria,
    #[serde(default)]
    pub subtopics: SubtopicCriteria,
}

impl GrowthCriteria {
    /// Criteria with nothing active; what a missing document means.
    pub fn inactive() -> Self {
        Self::default()
    }

    pub fn skill_dominance(&self) -> Option<(f64, Percentage)> {
        self.skills.dominance_threshold.and_then(|c| c.threshold())
    }

    pub fn skill_subtopic_count(&self) -> Option<(f64, Percentage)> {
        self.skills.subtopic_count.and_then(|c| c.threshold())
    }

    pub fn subtopic_dominance(&self) -> Option<(f64, Percentage)> {
        self.subtopics.dominance_threshold.and_then(|c| c.threshold())
    }

    pub fn subtopic_question_count(&self) -> Option<(f64, Percentage)> {
        self.subtopics.question_count.and_then(|c| c.threshold())
    }

    pub fn reinforcement_ratio(&self) -> Option<Percentage> {
        self.subtopics.reinforcement_ratio.and_then(|c| c.ratio())
    }

    /// Strict validation applied to admin edits.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(c) = &self.skills.dominance_threshold {
            c.validate("skills.dominance_threshold")?;
        }
        if let Some(c) = &self.skills.subtopic_count {
            c.validate("skills.subtopic_count")?;
        }
        if let Some(c) = &self.subtopics.dominance_threshold {
            c.validate("subtopics.dominance_threshold")?;
        }
        if let Some(c) = &self.subtopics.question_count {
            c.validate("subtopics.question_count")?;
        }
        if let Some(c) = &self.subtopics.reinforcement_ratio {
            c.validate("subtopics.reinforcement_ratio")?;
        }
        Ok(())
    }
}
