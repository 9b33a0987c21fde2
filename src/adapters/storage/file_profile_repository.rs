//! File-based Profile Repository
//!
//! Stores one YAML document per user under `<base>/profiles/`. File names
//! are the percent-encoded user id so any id maps to a single safe name.
//! Saves go through a temp file and a rename, and the version check plus
//! write run under one process-wide lock.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Mutex;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::profile::SkillProfile;
use crate::ports::ProfileRepository;

#[derive(Debug, Clone)]
pub struct FileProfileRepository {
    base_path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl FileProfileRepository {
    /// Create a repository rooted at `base_path`
    ///
    /// # Example
    /// ```ignore
    /// let repo = FileProfileRepository::new("./data");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    fn profiles_dir(&self) -> PathBuf {
        self.base_path.join("profiles")
    }

    fn profile_path(&self, user_id: &UserId) -> PathBuf {
        self.profiles_dir()
            .join(format!("{}.yaml", encode_file_name(user_id.as_str())))
    }

    async fn read(&self, user_id: &UserId) -> Result<Option<SkillProfile>, DomainError> {
        let path = self.profile_path(user_id);
        let yaml = match fs::read_to_string(&path).await {
            Ok(yaml) => yaml,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(DomainError::database(format!("Failed to read profile: {}", e))),
        };

        let profile: SkillProfile = serde_yaml::from_str(&yaml).map_err(|e| {
            DomainError::malformed(format!("Invalid profile document: {}", e))
                .with_detail("user_id", user_id.to_string())
        })?;
        if profile.user_id() != user_id {
            return Err(DomainError::malformed("Profile document belongs to another user")
                .with_detail("user_id", user_id.to_string()));
        }
        profile.validate()?;
        Ok(Some(profile))
    }

    async fn write(&self, profile: &SkillProfile) -> Result<(), DomainError> {
        let dir = self.profiles_dir();
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        let yaml = serde_yaml::to_string(profile)
            .map_err(|e| DomainError::database(format!("Failed to serialize profile: {}", e)))?;

        let path = self.profile_path(profile.user_id());
        let tmp = path.with_extension("yaml.tmp");
        fs::write(&tmp, yaml)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;
        fs::rename(&tmp, &path)
            .await
            .map_err(|e| DomainError::database(e.to_string()))
    }
}

/// Percent-encodes a user id into a single path segment.
pub(crate) fn encode_file_name(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}

#[async_trait]
impl ProfileRepository for FileProfileRepository {
    async fn create(&self, profile: &SkillProfile) -> Result<(), DomainError> {
        profile.validate()?;
        let _guard = self.write_lock.lock().await;
        if fs::try_exists(self.profile_path(profile.user_id()))
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
        {
            return Err(DomainError::profile_exists(profile.user_id()));
        }
        self.write(profile).await
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<SkillProfile>, DomainError> {
        self.read(user_id).await
    }

    async fn save(&self, profile: &SkillProfile) -> Result<u64, DomainError> {
        let _guard = self.write_lock.lock().await;
        let stored = self
            .read(profile.user_id())
            .await?
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
        self.write(&next).await?;
        Ok(next_version)
    }

    async fn exists(&self, user_id: &UserId) -> Result<bool, DomainError> {
        fs::try_exists(self.profile_path(user_id))
            .await
            .map_err(|e| DomainError::database(e.to_string()))
    }
}
