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

    /// Checks if this timestamp is after another.
    pub fn is_after(&self, other: &Timestamp) -> bool {
        self.0 > other.0
    }

    /// Whole days elapsed from `other` to this timestamp.
    ///
    /// Negative when `other` is after `self`.
    pub fn days_since(&self, other: &Timestamp) -> i64 {
        self.0.signed_duration_since(other.0).num_days()
    }

    /// Whole days from this timestamp until `other`.
    pub fn days_until(&self, other: &Timestamp) -> i64 {
        other.0.signed_duration_since(self.0).num_days()
    }

    /// Creates a new timestamp by adding the specified number of days.
    ///
    /// Negative values subtract days.
    pub fn add_days(&self, days: i64) -> Self {
        Self(self.0 + Duration::days(days))
    }

    /// Creates a new timestamp by subtracting the specified number of days.
    pub fn minus_days(&self, days: i64) -> Self {
        Self(self.0 - Duration::days(days))
    }

    /// Creates a new timestamp by subtracting the specified number of hours.
    pub fn minus_hours(&self, hours: i64) -> Self {
        Self(self.0 - Duration::hours(hours))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn days_since_counts_whole_days() {
        let now = Timestamp::now();
        let then = now.minus_days(14);
        assert_eq!(now.days_since(&then), 14);
    }

    #[test]
    fn days_since_truncates_partial_days() {
        let now = Timestamp::now();
        let then = now.minus_hours(14 * 24 + 12);
        // 14.5 days truncates to 14
        assert_eq!(now.days_since(&then), 14);
    }

    #[test]
    fn days_until_is_negative_for_past() {
        let now = Timestamp::now();
        let past = now.minus_days(3);
        assert_eq!(now.days_until(&past), -3);
    }

    #[test]
    fn add_days_round_trips_with_minus_days() {
        let now = Timestamp::now();
        assert_eq!(now.add_days(5).minus_days(5), now);
    }

    #[test]
    fn is_before_and_after_are_strict() {
        let now = Timestamp::now();
        assert!(!now.is_before(&now));
        assert!(!now.is_after(&now));
        assert!(now.minus_days(1).is_before(&now));
        assert!(now.add_days(1).is_after(&now));
    }
}
