//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Checks if this timestamp is before another.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    /// Returns the elapsed time since `earlier`, saturating at zero.
    pub fn elapsed_since(&self, earlier: &Timestamp) -> std::time::Duration {
        self.0
            .signed_duration_since(earlier.0)
            .to_std()
            .unwrap_or(std::time::Duration::ZERO)
    }

    /// Creates a timestamp from Unix seconds.
    ///
    /// Out-of-range values fall back to the Unix epoch.
    pub fn from_unix_secs(secs: u64) -> Self {
        let secs = i64::try_from(secs).unwrap_or(0);
        Self(DateTime::from_timestamp(secs, 0).unwrap_or_default())
    }

    /// Returns the timestamp as Unix seconds.
    pub fn as_unix_secs(&self) -> u64 {
        self.0.timestamp().max(0) as u64
    }

    /// Creates a new timestamp by adding the specified number of seconds.
    pub fn plus_secs(&self, secs: u64) -> Self {
        Self(self.0 + Duration::seconds(secs as i64))
    }

    /// Creates a new timestamp by adding a std duration (millisecond precision).
    pub fn plus(&self, duration: std::time::Duration) -> Self {
        Self(self.0 + Duration::milliseconds(duration.as_millis() as i64))
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn timestamp_now_creates_current_time() {
        let before = Utc::now();
        let ts = Timestamp::now();
        let after = Utc::now();

        assert!(ts.as_datetime() >= &before);
        assert!(ts.as_datetime() <= &after);
    }

    #[test]
    fn timestamp_serializes_to_json() {
        let dt = DateTime::parse_from_rfc3339("2024-01-15T10:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let ts = Timestamp::from_datetime(dt);

        let json = serde_json::to_string(&ts).unwrap();
        assert!(json.contains("2024-01-15"));
    }

    #[test]
    fn timestamp_from_unix_secs_works() {
        // 2024-01-15T00:00:00Z
        let ts = Timestamp::from_unix_secs(1705276800);
        assert_eq!(ts.as_datetime().year(), 2024);
        assert_eq!(ts.as_datetime().month(), 1);
        assert_eq!(ts.as_datetime().day(), 15);
        assert_eq!(ts.as_unix_secs(), 1705276800);
    }

    #[test]
    fn timestamp_plus_secs_adds_correctly() {
        let ts1 = Timestamp::from_unix_secs(1000);
        let ts2 = ts1.plus_secs(60);
        assert_eq!(ts2.as_unix_secs(), 1060);
        assert!(ts1.is_before(&ts2));
    }

    #[test]
    fn elapsed_since_measures_forward_distance() {
        let start = Timestamp::from_unix_secs(1000);
        let later = start.plus_secs(150);
        assert_eq!(later.elapsed_since(&start), std::time::Duration::from_secs(150));
    }

    #[test]
    fn elapsed_since_saturates_when_reversed() {
        let start = Timestamp::from_unix_secs(1000);
        let earlier = Timestamp::from_unix_secs(900);
        assert_eq!(earlier.elapsed_since(&start), std::time::Duration::ZERO);
    }

    #[test]
    fn plus_adds_std_duration() {
        let start = Timestamp::from_unix_secs(1000);
        let later = start.plus(std::time::Duration::from_millis(2500));
        assert_eq!(
            later.elapsed_since(&start),
            std::time::Duration::from_millis(2500)
        );
    }
}
