//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `memory` - In-memory stores for tests and single-process use
//! - `storage` - YAML/JSON-lines files on disk
//! - `postgres` - PostgreSQL via sqlx
//! - `ai` - AI providers (OpenAI, mock)
//! - `generation` - LLM-backed material generation and language detection

pub mod ai;
pub mod generation;
pub mod memory;
pub mod postgres;
pub mod storage;

pub use ai::{MockAIProvider, OpenAIConfig, OpenAIProvider};
pub use generation::LlmMaterialGenerator;
pub use memory::{InMemoryConfigStore, InMemoryProfileRepository, InMemoryQuestionHistory};
pub use postgres::{PostgresConfigStore, PostgresProfileRepository, PostgresQuestionHistory};
pub use storage::{FileConfigStore, FileProfileRepository, FileQuestionHistory};
