//! Storage Adapters
//!
//! File-backed implementations of the storage ports.
//!
//! ## Layout
//!
//! ```text
//! <base>/
//!   profiles/<user>.yaml
//!   config/growth_criteria.yaml
//!   config/duration_templates.yaml
//!   questions.jsonl
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileConfigStore, FileProfileRepository};
//!
//! let profiles = FileProfileRepository::new("./data");
//! let config = FileConfigStore::new("./data");
//! ```

mod file_config_store;
mod file_profile_repository;
mod file_question_history;

pub use file_config_store::FileConfigStore;
pub use file_profile_repository::FileProfileRepository;
pub use file_question_history::FileQuestionHistory;
