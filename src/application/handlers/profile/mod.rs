//! Profile command handlers.

mod create_profile;
mod record_question;
mod record_score;

pub use create_profile::{CreateProfileCommand, CreateProfileHandler, CreateProfileResult, SkillSeed};
pub use record_question::{RecordQuestionCommand, RecordQuestionHandler};
pub use record_score::{RecordScoreCommand, RecordScoreHandler, RecordScoreResult};
