//! Profile module - the per-user skill profile aggregate.
//!
//! A `SkillProfile` holds the skills and subtopics a user is assessed on,
//! the languages used for code questions, and the rotation mode of each
//! skill kind. It is created once when the user submits a CV and then
//! mutated by growth, rotation and reinforcement.

mod language;
#[allow(clippy::module_inception)]
mod profile;
mod rotation_mode;
mod skill;

pub use language::{canonical_language, Language, SUPPORTED_LANGUAGES};
pub use profile::{Classification, SkillProfile};
pub use rotation_mode::{ReinforcementState, RotationMode};
pub use skill::{names_match, ExpectedLevel, Skill, SkillKind, Subtopic};
