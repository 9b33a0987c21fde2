//! Per-kind rotation mode.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::SkillKind;
use crate::domain::foundation::StateMachine;

/// Whether rotation for a skill kind is running normally or consuming
/// reinforcement flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationMode {
    #[default]
    Normal,
    Reinforcing,
}

impl RotationMode {
    pub fn is_reinforcing(&self) -> bool {
        matches!(self, RotationMode::Reinforcing)
    }
}

impl fmt::Display for RotationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RotationMode::Normal => f.write_str("normal"),
            RotationMode::Reinforcing => f.write_str("reinforcing"),
        }
    }
}

impl StateMachine for RotationMode {
    fn can_transition_to(&self, target: &Self) -> bool {
        use RotationMode::*;
        matches!((self, target), (Normal, Reinforcing) | (Reinforcing, Normal))
    }
}

/// Rotation mode for each skill kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReinforcementState {
    #[serde(default)]
    pub technical: RotationMode,
    #[serde(default)]
    pub soft: RotationMode,
}

impl ReinforcementState {
    pub fn mode(&self, kind: SkillKind) -> RotationMode {
        match kind {
            SkillKind::Technical => self.technical,
            SkillKind::Soft => self.soft,
        }
    }

    pub fn set_mode(&mut self, kind: SkillKind, mode: RotationMode) {
        match kind {
            SkillKind::Technical => self.technical = mode,
            SkillKind::Soft => self.soft = mode,
        }
    }
}
