//! In-Memory Profile Repository
//!
//! Holds profiles in a map guarded by an async RwLock. Used by tests and
//! single-process development setups.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::profile::SkillProfile;
use crate::ports::ProfileRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileRepository {
    profiles: Arc<RwLock<HashMap<UserId, SkillProfile>>>,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored profiles
    pub async fn count(&self) -> usize {
        self.profiles.read().await.len()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn create(&self, profile: &SkillProfile) -> Result<(), DomainError> {
        profile.validate()?;
        let mut profiles = self.profiles.write().await;
        if profiles.contains_key(profile.user_id()) {
            return Err(DomainError::profile_exists(profile.user_id()));
        }
        profiles.insert(profile.user_id().clone(), profile.clone());
        Ok(())
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<SkillProfile>, DomainError> {
        Ok(self.profiles.read().await.get(user_id).cloned())
    }

    async fn save(&self, profile: &SkillProfile) -> Result<u64, DomainError> {
        let mut profiles = self.profiles.write().await;
        let stored = profiles
            .get(profile.user_id())
            .ok_or_else(|| DomainError::profile_not_found(profile.user_id()))?;

        if stored.version() != profile.version() {
            return Err(DomainError::concurrent_modification(
                profile.user_id(),
                profile.version(),
                stored.version(),
            ));
        }

        let next_version = profile.version() + 1;
        let mut next = profile.clone();
        next.set_version(next_version);
        profiles.insert(profile.user_id().clone(), next);
        Ok(next_version)
    }

    async fn exists(&self, user_id: &UserId) -> Result<bool, DomainError> {
        Ok(self.profiles.read().await.contains_key(user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;
    use crate::domain::profile::Classification;

    fn profile(user: &str) -> SkillProfile {
        SkillProfile::new(UserId::new(user).unwrap(), Classification::Academic)
    }

    #[tokio::test]
    async fn create_then_find() {
        let repo = InMemoryProfileRepository::new();
        repo.create(&profile("u1")).await.unwrap();

        let found = repo.find_by_user(&UserId::new("u1").unwrap()).await.unwrap();
        assert!(found.is_some());
        assert!(repo.exists(&UserId::new("u1").unwrap()).await.unwrap());
        assert!(!repo.exists(&UserId::new("u2").unwrap()).await.unwrap());
    }

    #[tokio::test]
    async fn create_twice_fails() {
        let repo = InMemoryProfileRepository::new();
        repo.create(&profile("u1")).await.unwrap();
        let err = repo.create(&profile("u1")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ProfileAlreadyExists);
    }

    #[tokio::test]
    async fn save_bumps_version_and_rejects_stale_snapshots() {
        let repo = InMemoryProfileRepository::new();
        let original = profile("u1");
        repo.create(&original).await.unwrap();

        let version = repo.save(&original).await.unwrap();
        assert_eq!(version, 1);

        let err = repo.save(&original).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ConcurrentModification);

        let fresh = repo
            .find_by_user(original.user_id())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fresh.version(), 1);
        assert_eq!(repo.save(&fresh).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn save_missing_profile_fails() {
        let repo = InMemoryProfileRepository::new();
        let err = repo.save(&profile("ghost")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ProfileNotFound);
    }
}
