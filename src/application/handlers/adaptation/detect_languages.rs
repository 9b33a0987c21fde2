//! DetectLanguages - adds code-challenge languages inferred from technical skills.

use crate::application::AdaptationServices;
use crate::domain::foundation::{CommandMetadata, DomainError};

#[derive(Debug, Clone)]
pub struct DetectLanguagesResult {
    /// Canonical names appended to the profile.
    pub added: Vec<String>,
    pub version: u64,
}

pub struct DetectLanguagesHandler {
    services: AdaptationServices,
}

impl DetectLanguagesHandler {
    pub fn new(services: AdaptationServices) -> Self {
        Self { services }
    }

    pub async fn handle(&self, metadata: CommandMetadata) -> Result<DetectLanguagesResult, DomainError> {
        let _guard = self.services.locks.lock(&metadata.user_id).await;
        let mut profile = self.services.load_profile(&metadata.user_id).await?;

        let added = self.services.detect_languages(&mut profile).await;
        let version = if added.is_empty() {
            profile.version()
        } else {
            self.services.save_profile(&mut profile).await?
        };

        Ok(DetectLanguagesResult { added, version })
    }
}
