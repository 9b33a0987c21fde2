//! Admin configuration handlers.

mod configure_adaptation;

pub use configure_adaptation::{
    AdaptationConfigView, GetAdaptationConfigHandler, UpdateDurationTemplatesCommand,
    UpdateDurationTemplatesHandler, UpdateGrowthCriteriaCommand, UpdateGrowthCriteriaHandler,
};
