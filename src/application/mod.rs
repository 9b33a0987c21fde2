//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;
mod services;
mod synthesis;
mod user_locks;

#[cfg(test)]
mod testing;

pub use handlers::*;
pub use services::AdaptationServices;
pub use synthesis::{AddedSubtopic, GrowthOutcome};
pub use user_locks::UserLocks;
