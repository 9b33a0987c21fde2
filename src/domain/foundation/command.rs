//! Per-call context handed to every application handler.
//!
//! The acting user doubles as the profile owner: handlers only ever load and
//! save `metadata.user_id`'s profile.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UserId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMetadata {
    pub user_id: UserId,

    /// Ties together the log lines of one interview request.
    correlation_id: String,

    /// Caller name, e.g. "interview_builder" or "admin_console".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    source: Option<String>,
}

impl CommandMetadata {
    /// Context for `user_id` with a fresh correlation id.
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            correlation_id: Uuid::new_v4().to_string(),
            source: None,
        }
    }

    /// Reuses the caller's correlation id.
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = id.into();
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn correlation_id(&self) -> &str {
        &self.correlation_id
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

#[cfg(test)]
impl CommandMetadata {
    pub fn test_fixture(user: &str) -> Self {
        Self::new(UserId::new(user).unwrap())
            .with_correlation_id("test-correlation-id")
            .with_source("test")
    }
}
