//! ProfileRepository port for skill profile persistence

use async_trait::async_trait;

use crate::domain::{
    foundation::{DomainError, UserId},
    profile::SkillProfile,
};

/// Repository for per-user skill profiles.
///
/// Saves are whole-document replacements guarded by the profile version:
/// `save` succeeds only when the stored version equals `profile.version()`,
/// and the stored version is then incremented. Implementations return the
/// new version so callers can keep working with the same snapshot.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Create a new profile; fails with `ProfileAlreadyExists` if one is stored
    async fn create(&self, profile: &SkillProfile) -> Result<(), DomainError>;

    /// Find profile by user ID, validating the stored document
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<SkillProfile>, DomainError>;

    /// Replace the stored profile; fails with `ConcurrentModification` on version mismatch
    async fn save(&self, profile: &SkillProfile) -> Result<u64, DomainError>;

    /// Check if profile exists for user
    async fn exists(&self, user_id: &UserId) -> Result<bool, DomainError>;
}
