//! Tunable turn policy for a session.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::clock::{DEFAULT_TIME_LIMIT_SECS, MAX_TIME_LIMIT_SECS, MIN_TIME_LIMIT_SECS};
use crate::domain::foundation::ValidationError;

pub const DEFAULT_REASK_PROBABILITY: f64 = 0.5;
pub const DEFAULT_URGENT_REASK_SECS: u64 = 60;
pub const DEFAULT_WRAP_UP_SECS: u64 = 30;

/// Session timing and re-ask behaviour, fixed at session start.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OnboardingPolicy {
    pub time_limit_secs: u64,
    /// Chance of re-asking a missing field on an open-conversation turn.
    pub reask_probability: f64,
    /// Below this much remaining time a missing field is always re-asked.
    pub urgent_reask_threshold: Duration,
    /// Below this much remaining time in open conversation, completion is due.
    pub wrap_up_threshold: Duration,
}

impl Default for OnboardingPolicy {
    fn default() -> Self {
        Self {
            time_limit_secs: DEFAULT_TIME_LIMIT_SECS,
            reask_probability: DEFAULT_REASK_PROBABILITY,
            urgent_reask_threshold: Duration::from_secs(DEFAULT_URGENT_REASK_SECS),
            wrap_up_threshold: Duration::from_secs(DEFAULT_WRAP_UP_SECS),
        }
    }
}

impl OnboardingPolicy {
    pub fn with_time_limit(mut self, secs: u64) -> Self {
        self.time_limit_secs = secs;
        self
    }

    pub fn with_reask_probability(mut self, probability: f64) -> Self {
        self.reask_probability = probability;
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(MIN_TIME_LIMIT_SECS..=MAX_TIME_LIMIT_SECS).contains(&self.time_limit_secs) {
            return Err(ValidationError::out_of_range(
                "time_limit_secs",
                MIN_TIME_LIMIT_SECS as i32,
                MAX_TIME_LIMIT_SECS as i32,
                i32::try_from(self.time_limit_secs).unwrap_or(i32::MAX),
            ));
        }
        if !(0.0..=1.0).contains(&self.reask_probability) {
            return Err(ValidationError::invalid_format(
                "reask_probability",
                "must be between 0.0 and 1.0",
            ));
        }
        if self.wrap_up_threshold > self.urgent_reask_threshold {
            return Err(ValidationError::invalid_format(
                "wrap_up_threshold",
                "must not exceed the urgent re-ask threshold",
            ));
        }
        Ok(())
    }
}
