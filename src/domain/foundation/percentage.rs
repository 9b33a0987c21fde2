//! Percentage value object, stored as a fraction (0.0 - 1.0).
//!
//! Growth criteria express "what share of skills or subtopics must satisfy a
//! threshold" as a fraction, so `1.0` means every one of them.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A fraction between 0.0 and 1.0 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Percentage(f64);

impl Percentage {
    /// Zero percent.
    pub const ZERO: Self = Self(0.0);

    /// One hundred percent.
    pub const HUNDRED: Self = Self(1.0);

    /// Creates a new Percentage, clamping to the valid range.
    ///
    /// NaN is treated as zero.
    pub fn new(fraction: f64) -> Self {
        if fraction.is_nan() {
            return Self::ZERO;
        }
        Self(fraction.clamp(0.0, 1.0))
    }

    /// Creates a Percentage, returning error if out of range or not finite.
    pub fn try_new(fraction: f64) -> Result<Self, ValidationError> {
        if !fraction.is_finite() || !(0.0..=1.0).contains(&fraction) {
            return Err(ValidationError::invalid_format(
                "percentage",
                format!("expected a fraction between 0.0 and 1.0, got {}", fraction),
            ));
        }
        Ok(Self(fraction))
    }

    /// Returns the value as a fraction (0.0 to 1.0).
    pub fn as_fraction(&self) -> f64 {
        self.0
    }

    /// Returns true when `satisfied` out of `total` reaches this percentage.
    ///
    /// An empty population never reaches it.
    pub fn is_reached_by(&self, satisfied: usize, total: usize) -> bool {
        if total == 0 {
            return false;
        }
        satisfied as f64 / total as f64 >= self.0
    }
}

impl Default for Percentage {
    fn default() -> Self {
        Self::HUNDRED
    }
}

impl TryFrom<f64> for Percentage {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<Percentage> for f64 {
    fn from(p: Percentage) -> Self {
        p.0
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", (self.0 * 100.0).round())
    }
}
