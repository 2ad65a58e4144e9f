//! Percentage value object (0-100 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A value between 0 and 100 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percentage(u8);

impl Percentage {
    /// Zero percent.
    pub const ZERO: Self = Self(0);

    /// One hundred percent.
    pub const HUNDRED: Self = Self(100);

    /// Creates a new Percentage, clamping to valid range.
    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    /// Creates a Percentage from a `part / whole` ratio, rounded and clamped.
    ///
    /// A zero or negative `whole` is treated as fully consumed.
    pub fn from_ratio(part: f64, whole: f64) -> Self {
        if whole <= 0.0 {
            return Self::HUNDRED;
        }
        let pct = (part / whole * 100.0).round();
        if pct.is_nan() || pct <= 0.0 {
            Self::ZERO
        } else if pct >= 100.0 {
            Self::HUNDRED
        } else {
            Self(pct as u8)
        }
    }

    /// Returns the value as u8.
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Default for Percentage {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
