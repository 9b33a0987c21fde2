//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Storage Ports
//!
//! - `ProfileRepository` - Per-user skill profiles, version-checked saves
//! - `AdaptationConfigStore` - Growth criteria and duration templates
//! - `QuestionHistory` - Prior questions per (user, skill, subtopic)
//!
//! ## Collaborator Ports
//!
//! - `AIProvider` - Chat completions from an LLM provider
//! - `MaterialGenerator` - New skills and subtopics
//! - `LanguageClassifier` - Code-challenge languages from technical skills

mod ai_provider;
mod config_store;
mod material_generator;
mod profile_repository;
mod question_history;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, RequestMetadata, ResponseFormat, TokenUsage,
};
pub use config_store::AdaptationConfigStore;
pub use material_generator::{
    GeneratedSkill, GeneratedSubtopic, GenerationError, LanguageClassifier, MaterialGenerator,
    SkillRequest, SubtopicRequest,
};
pub use profile_repository::ProfileRepository;
pub use question_history::QuestionHistory;
