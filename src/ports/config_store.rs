//! AdaptationConfigStore port for admin-controlled engine settings

use async_trait::async_trait;

use crate::domain::{
    adaptation::GrowthCriteria,
    foundation::DomainError,
    interview::DurationTemplates,
};

/// Store for the growth criteria and interview duration templates.
///
/// `None` means the document was never written. Callers treat missing
/// criteria as all-inactive and missing templates as the defaults.
#[async_trait]
pub trait AdaptationConfigStore: Send + Sync {
    async fn growth_criteria(&self) -> Result<Option<GrowthCriteria>, DomainError>;

    async fn save_growth_criteria(&self, criteria: &GrowthCriteria) -> Result<(), DomainError>;

    async fn duration_templates(&self) -> Result<Option<DurationTemplates>, DomainError>;

    async fn save_duration_templates(&self, templates: &DurationTemplates)
        -> Result<(), DomainError>;
}
