//! Adaptation Module - Pure domain services that steer question selection.
//!
//! # Components
//!
//! - `GrowthCriteria` - Admin-tunable thresholds, read leniently
//! - `GrowthPolicy` - When to synthesize new skills or subtopics
//! - `RotationSession` - Round-robin (skill, subtopic) selection with reinforcement
//! - `ReinforcementTrigger` - Flags the weakest subtopics after a full cycle
//! - `LanguageRotation` - Least-used-first rotation over code languages
//!
//! Everything here operates on an in-memory `SkillProfile`. Loading,
//! persisting and calling external generators is the application layer's job.

mod criteria;
mod growth_policy;
mod language_rotation;
mod reinforcement;
mod rotation;

pub use criteria::{
    GrowthCriteria, RatioCriterion, SkillCriteria, SubtopicCriteria, ThresholdCriterion,
    DEFAULT_REINFORCEMENT_RATIO,
};
pub use growth_policy::{GrowthPolicy, GrowthReport, QuestionTally};
pub use language_rotation::LanguageRotation;
pub use reinforcement::ReinforcementTrigger;
pub use rotation::{RotationSession, TopicPick};
