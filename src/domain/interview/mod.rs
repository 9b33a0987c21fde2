//! Interview module - durations, modes and question records.

mod question;
mod template;

pub use question::QuestionRecord;
pub use template::{
    DurationTemplate, DurationTemplates, InterviewDuration, InterviewMode, QuestionPlan,
};
