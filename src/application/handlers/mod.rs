//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations. Handlers
//! that change a profile hold the user's lock for the whole operation and
//! write the profile back once.

pub mod adaptation;
pub mod admin;
pub mod interview;
pub mod profile;

pub use adaptation::{
    ActivateReinforcementCommand, ActivateReinforcementHandler, ActivateReinforcementResult,
    CreateSkillCommand, CreateSkillHandler, CreateSubtopicCommand, CreateSubtopicHandler,
    DetectLanguagesHandler, DetectLanguagesResult, EvaluateGrowthHandler, EvaluateGrowthQuery,
    GrowProfileCommand, GrowProfileHandler, GrowProfileResult, SelectLanguagesCommand,
    SelectLanguagesHandler, SelectLanguagesResult, SelectTopicsCommand, SelectTopicsHandler,
    SelectTopicsResult,
};
pub use admin::{
    AdaptationConfigView, GetAdaptationConfigHandler, UpdateDurationTemplatesCommand,
    UpdateDurationTemplatesHandler, UpdateGrowthCriteriaCommand, UpdateGrowthCriteriaHandler,
};
pub use interview::{InterviewBlueprint, PrepareInterviewCommand, PrepareInterviewHandler};
pub use profile::{
    CreateProfileCommand, CreateProfileHandler, CreateProfileResult, RecordQuestionCommand,
    RecordQuestionHandler, RecordScoreCommand, RecordScoreHandler, RecordScoreResult, SkillSeed,
};
