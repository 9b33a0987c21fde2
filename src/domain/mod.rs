//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `profile` - The per-user `SkillProfile` aggregate
//! - `adaptation` - Pure services for growth, rotation and reinforcement
//! - `interview` - Durations, modes and question records

pub mod adaptation;
pub mod foundation;
pub mod interview;
pub mod profile;
