//! Interview durations and their per-type question templates.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;
use crate::domain::profile::SkillKind;

/// Interview length offered to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewDuration {
    Short,
    Medium,
    Long,
}

impl InterviewDuration {
    pub const ALL: [InterviewDuration; 3] = [
        InterviewDuration::Short,
        InterviewDuration::Medium,
        InterviewDuration::Long,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InterviewDuration::Short => "short",
            InterviewDuration::Medium => "medium",
            InterviewDuration::Long => "long",
        }
    }
}

impl fmt::Display for InterviewDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InterviewDuration {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "short" => Ok(InterviewDuration::Short),
            "medium" => Ok(InterviewDuration::Medium),
            "long" => Ok(InterviewDuration::Long),
            other => Err(ValidationError::invalid_format(
                "duration",
                format!("unknown duration '{}'", other),
            )),
        }
    }
}

/// Which question types an interview draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewMode {
    /// Per-type counts from the duration template.
    #[default]
    Mixed,
    TechnicalOnly,
    SoftOnly,
    CodeOnly,
}

/// Question counts for one interview duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationTemplate {
    pub minutes: u32,
    pub questions: u32,
    pub technical: u32,
    pub soft: u32,
    pub code: u32,
}

impl DurationTemplate {
    pub const fn new(minutes: u32, questions: u32, technical: u32, soft: u32, code: u32) -> Self {
        Self {
            minutes,
            questions,
            technical,
            soft,
            code,
        }
    }

    /// Per-type counts must add up to the total.
    pub fn validate(&self, duration: InterviewDuration) -> Result<(), ValidationError> {
        if self.minutes == 0 {
            return Err(ValidationError::out_of_range(
                format!("{}.minutes", duration),
                1,
                i64::from(u32::MAX),
                0,
            ));
        }
        if self.questions == 0 {
            return Err(ValidationError::out_of_range(
                format!("{}.questions", duration),
                1,
                i64::from(u32::MAX),
                0,
            ));
        }
        let sum = u64::from(self.technical) + u64::from(self.soft) + u64::from(self.code);
        if sum != u64::from(self.questions) {
            return Err(ValidationError::invalid_format(
                format!("{}.questions", duration),
                format!(
                    "technical + soft + code = {} but questions = {}",
                    sum, self.questions
                ),
            ));
        }
        Ok(())
    }
}

/// One template per duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationTemplates {
    pub short: DurationTemplate,
    pub medium: DurationTemplate,
    pub long: DurationTemplate,
}

impl Default for DurationTemplates {
    fn default() -> Self {
        Self {
            short: DurationTemplate::new(20, 10, 4, 3, 3),
            medium: DurationTemplate::new(40, 20, 8, 6, 6),
            long: DurationTemplate::new(60, 30, 10, 10, 10),
        }
    }
}

impl DurationTemplates {
    pub fn get(&self, duration: InterviewDuration) -> &DurationTemplate {
        match duration {
            InterviewDuration::Short => &self.short,
            InterviewDuration::Medium => &self.medium,
            InterviewDuration::Long => &self.long,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        for duration in InterviewDuration::ALL {
            self.get(duration).validate(duration)?;
        }
        Ok(())
    }
}

/// Resolved question counts for one interview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionPlan {
    pub minutes: u32,
    pub technical: u32,
    pub soft: u32,
    pub code: u32,
}

impl QuestionPlan {
    /// Applies the mode to a template; single-type modes get every question.
    pub fn resolve(template: &DurationTemplate, mode: InterviewMode) -> Self {
        let (technical, soft, code) = match mode {
            InterviewMode::Mixed => (template.technical, template.soft, template.code),
            InterviewMode::TechnicalOnly => (template.questions, 0, 0),
            InterviewMode::SoftOnly => (0, template.questions, 0),
            InterviewMode::CodeOnly => (0, 0, template.questions),
        };
        Self {
            minutes: template.minutes,
            technical,
            soft,
            code,
        }
    }

    /// Topic questions requested for a skill kind.
    pub fn count(&self, kind: SkillKind) -> u32 {
        match kind {
            SkillKind::Technical => self.technical,
            SkillKind::Soft => self.soft,
        }
    }

    pub fn total(&self) -> u32 {
        self.technical + self.soft + self.code
    }
}
