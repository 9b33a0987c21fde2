//! SelectLanguages - picks the least-used code-challenge languages.

use crate::application::AdaptationServices;
use crate::domain::adaptation::LanguageRotation;
use crate::domain::foundation::{CommandMetadata, DomainError};

#[derive(Debug, Clone, Copy)]
pub struct SelectLanguagesCommand {
    pub count: usize,
}

#[derive(Debug, Clone)]
pub struct SelectLanguagesResult {
    pub languages: Vec<String>,
    pub version: u64,
}

pub struct SelectLanguagesHandler {
    services: AdaptationServices,
}

impl SelectLanguagesHandler {
    pub fn new(services: AdaptationServices) -> Self {
        Self { services }
    }

    pub async fn handle(
        &self,
        cmd: SelectLanguagesCommand,
        metadata: CommandMetadata,
    ) -> Result<SelectLanguagesResult, DomainError> {
        let _guard = self.services.locks.lock(&metadata.user_id).await;
        let mut profile = self.services.load_profile(&metadata.user_id).await?;

        let languages = LanguageRotation::select(&mut profile, cmd.count);
        let version = if languages.is_empty() {
            profile.version()
        } else {
            self.services.save_profile(&mut profile).await?
        };

        Ok(SelectLanguagesResult { languages, version })
    }
}
