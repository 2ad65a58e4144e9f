//! The conversation time budget.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::foundation::{Percentage, Timestamp, ValidationError};

pub const DEFAULT_TIME_LIMIT_SECS: u64 = 300;
pub const MIN_TIME_LIMIT_SECS: u64 = 60;
pub const MAX_TIME_LIMIT_SECS: u64 = 600;

/// Start instant plus a fixed limit. Everything else is derived from `now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationClock {
    started_at: Timestamp,
    limit: Duration,
}

impl ConversationClock {
    /// Starts a clock, rejecting limits outside 60..=600 seconds.
    pub fn start(started_at: Timestamp, limit_secs: u64) -> Result<Self, ValidationError> {
        if !(MIN_TIME_LIMIT_SECS..=MAX_TIME_LIMIT_SECS).contains(&limit_secs) {
            return Err(ValidationError::out_of_range(
                "time_limit_secs",
                MIN_TIME_LIMIT_SECS as i32,
                MAX_TIME_LIMIT_SECS as i32,
                i32::try_from(limit_secs).unwrap_or(i32::MAX),
            ));
        }
        Ok(Self {
            started_at,
            limit: Duration::from_secs(limit_secs),
        })
    }

    pub fn started_at(&self) -> Timestamp {
        self.started_at
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }

    pub fn elapsed(&self, now: Timestamp) -> Duration {
        now.elapsed_since(&self.started_at)
    }

    pub fn remaining(&self, now: Timestamp) -> Duration {
        self.limit.saturating_sub(self.elapsed(now))
    }

    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.elapsed(now) >= self.limit
    }

    /// True once the budget has run out by more than `grace`.
    pub fn is_overdue(&self, now: Timestamp, grace: Duration) -> bool {
        self.elapsed(now) >= self.limit.saturating_add(grace)
    }

    /// Share of the budget used, 0 to 100.
    pub fn progress(&self, now: Timestamp) -> Percentage {
        Percentage::from_ratio(
            self.elapsed(now).as_millis() as f64,
            self.limit.as_millis() as f64,
        )
    }
}
