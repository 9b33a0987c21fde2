//! Adaptation command and query handlers.

mod activate_reinforcement;
mod create_skill;
mod create_subtopic;
mod detect_languages;
mod evaluate_growth;
mod grow_profile;
mod select_languages;
mod select_topics;

pub use activate_reinforcement::{
    ActivateReinforcementCommand, ActivateReinforcementHandler, ActivateReinforcementResult,
};
pub use create_skill::{CreateSkillCommand, CreateSkillHandler};
pub use create_subtopic::{CreateSubtopicCommand, CreateSubtopicHandler};
pub use detect_languages::{DetectLanguagesHandler, DetectLanguagesResult};
pub use evaluate_growth::{EvaluateGrowthHandler, EvaluateGrowthQuery};
pub use grow_profile::{GrowProfileCommand, GrowProfileHandler, GrowProfileResult};
pub use select_languages::{SelectLanguagesCommand, SelectLanguagesHandler, SelectLanguagesResult};
pub use select_topics::{SelectTopicsCommand, SelectTopicsHandler, SelectTopicsResult};
