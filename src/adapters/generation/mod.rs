//! Material generation adapters.
//!
//! `LlmMaterialGenerator` implements both `MaterialGenerator` and
//! `LanguageClassifier` on top of any `AIProvider`.

mod llm_generator;

pub use llm_generator::LlmMaterialGenerator;
