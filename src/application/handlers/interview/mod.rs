//! Interview preparation.

mod prepare_interview;

pub use prepare_interview::{InterviewBlueprint, PrepareInterviewCommand, PrepareInterviewHandler};
