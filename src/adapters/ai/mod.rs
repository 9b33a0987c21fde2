//! Chat-completion providers behind the `AIProvider` port.
//!
//! `OpenAIProvider` talks to the chat completions endpoint in JSON mode.
//! `MockAIProvider` replays queued replies and is what the tests drive.

mod mock_provider;
mod openai_provider;

pub use mock_provider::{MockAIProvider, MockError, MockResponse};
pub use openai_provider::{OpenAIConfig, OpenAIProvider};
