//! Onboarding session configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::domain::onboarding::{
    OnboardingPolicy, DEFAULT_TIME_LIMIT_SECS, MAX_TIME_LIMIT_SECS, MIN_TIME_LIMIT_SECS,
};

/// Onboarding session configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OnboardingConfig {
    /// Conversation time budget in seconds (60..=600)
    #[serde(default = "default_time_limit")]
    pub time_limit_secs: u64,

    /// Chance of re-asking a missing field on an open-conversation turn
    #[serde(default = "default_reask_probability")]
    pub reask_probability: f64,

    /// Below this many remaining seconds a missing field is always re-asked
    #[serde(default = "default_urgent_reask")]
    pub urgent_reask_secs: u64,

    /// Below this many remaining seconds in open conversation, completion is due
    #[serde(default = "default_wrap_up")]
    pub wrap_up_secs: u64,

    /// Fixed seed for the per-session random source. Unset means OS entropy.
    pub random_seed: Option<u64>,

    /// Live sessions the server holds before refusing new ones
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,

    /// How long past its time limit an unfinished session is kept
    #[serde(default = "default_abandoned_grace")]
    pub abandoned_grace_secs: u64,
}

impl OnboardingConfig {
    /// The per-session policy these settings describe
    pub fn policy(&self) -> OnboardingPolicy {
        OnboardingPolicy {
            time_limit_secs: self.time_limit_secs,
            reask_probability: self.reask_probability,
            urgent_reask_threshold: Duration::from_secs(self.urgent_reask_secs),
            wrap_up_threshold: Duration::from_secs(self.wrap_up_secs),
        }
    }

    pub fn abandoned_grace(&self) -> Duration {
        Duration::from_secs(self.abandoned_grace_secs)
    }

    /// Validate onboarding configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(MIN_TIME_LIMIT_SECS..=MAX_TIME_LIMIT_SECS).contains(&self.time_limit_secs) {
            return Err(ValidationError::InvalidTimeLimit(self.time_limit_secs));
        }
        if !(0.0..=1.0).contains(&self.reask_probability) {
            return Err(ValidationError::InvalidProbability);
        }
        if self.wrap_up_secs > self.urgent_reask_secs {
            return Err(ValidationError::InvalidThresholds);
        }
        if self.max_sessions == 0 {
            return Err(ValidationError::InvalidMaxSessions);
        }
        Ok(())
    }
}

impl Default for OnboardingConfig {
    fn default() -> Self {
        Self {
            time_limit_secs: default_time_limit(),
            reask_probability: default_reask_probability(),
            urgent_reask_secs: default_urgent_reask(),
            wrap_up_secs: default_wrap_up(),
            random_seed: None,
            max_sessions: default_max_sessions(),
            abandoned_grace_secs: default_abandoned_grace(),
        }
    }
}

fn default_time_limit() -> u64 {
    DEFAULT_TIME_LIMIT_SECS
}

fn default_reask_probability() -> f64 {
    0.5
}

fn default_urgent_reask() -> u64 {
    60
}

fn default_wrap_up() -> u64 {
    30
}

fn default_max_sessions() -> usize {
    10_000
}

fn default_abandoned_grace() -> u64 {
    120
}
