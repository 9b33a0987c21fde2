//! Per-user serialization of profile mutations.
//!
//! Handlers that load, mutate and save a profile hold the user's lock for
//! the whole unit of work, so two requests for one user never interleave
//! inside a process. The repository version check covers other processes.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::foundation::UserId;

/// Map of per-user async mutexes.
#[derive(Debug, Clone, Default)]
pub struct UserLocks {
    locks: Arc<Mutex<HashMap<UserId, Arc<Mutex<()>>>>>,
}

impl UserLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for and takes the lock of `user_id`.
    ///
    /// Entries nobody holds or waits on are pruned on the way in.
    pub async fn lock(&self, user_id: &UserId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            locks.retain(|id, lock| id == user_id || Arc::strong_count(lock) > 1);
            locks.entry(user_id.clone()).or_default().clone()
        };
        lock.lock_owned().await
    }

    /// Number of users with a live entry.
    pub async fn tracked(&self) -> usize {
        self.locks.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn same_user_is_serialized() {
        let locks = UserLocks::new();
        let user = UserId::new("u1").unwrap();

        let guard = locks.lock(&user).await;
        let second = tokio::time::timeout(Duration::from_millis(50), locks.lock(&user)).await;
        assert!(second.is_err());

        drop(guard);
        let third = tokio::time::timeout(Duration::from_millis(50), locks.lock(&user)).await;
        assert!(third.is_ok());
    }

    #[tokio::test]
    async fn different_users_do_not_block() {
        let locks = UserLocks::new();
        let _a = locks.lock(&UserId::new("a").unwrap()).await;
        let b = tokio::time::timeout(
            Duration::from_millis(50),
            locks.lock(&UserId::new("b").unwrap()),
        )
        .await;
        assert!(b.is_ok());
    }

    #[tokio::test]
    async fn released_entries_are_pruned() {
        let locks = UserLocks::new();
        drop(locks.lock(&UserId::new("a").unwrap()).await);
        drop(locks.lock(&UserId::new("b").unwrap()).await);
        assert_eq!(locks.tracked().await, 1);
    }
}
