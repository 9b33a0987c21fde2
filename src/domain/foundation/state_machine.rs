//! Guarded transitions for mode enums.

use super::ValidationError;

/// A mode enum whose changes must follow an allowed edge.
///
/// Implementors list their edges in `can_transition_to`; callers go through
/// `transition_to` so an illegal change surfaces as a validation error
/// instead of silently overwriting the stored mode.
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    fn can_transition_to(&self, target: &Self) -> bool;

    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            return Ok(target);
        }
        Err(ValidationError::invalid_format(
            "mode",
            format!("{:?} cannot change to {:?}", self, target),
        ))
    }
}
