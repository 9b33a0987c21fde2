//! Interview Engine - adaptive topic selection for simulated job interviews.
//!
//! Keeps a per-user profile of skills and subtopics, grows it with generated
//! material as the user masters it, and rotates questions fairly across it.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
