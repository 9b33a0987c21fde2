//! In-memory adapters for every storage port.

mod config_store;
mod profile_repository;
mod question_history;

pub use config_store::InMemoryConfigStore;
pub use profile_repository::InMemoryProfileRepository;
pub use question_history::InMemoryQuestionHistory;
