//! Half-open time intervals

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::MAX_DURATION_MINUTES;
use crate::errors::{AgendaError, Result};

/// A `[start, end)` range of absolute instants.
///
/// The end instant is excluded, so an interval ending at 11:00 and one
/// starting at 11:00 do not overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeInterval {
    /// Build an interval, rejecting empty or inverted ranges.
    ///
    /// # Errors
    /// Returns `AgendaError::Validation` when `end <= start`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if end <= start {
            return Err(AgendaError::Validation(format!(
                "interval end {end} must be after start {start}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Interval starting at `start` and lasting `minutes`.
    ///
    /// # Errors
    /// Returns `AgendaError::Validation` for non-positive durations or an
    /// end outside the representable range.
    pub fn from_minutes(start: DateTime<Utc>, minutes: i64) -> Result<Self> {
        let end = Duration::try_minutes(minutes)
            .and_then(|length| start.checked_add_signed(length))
            .ok_or_else(|| {
                AgendaError::Validation(format!("duration of {minutes} minutes is out of range"))
            })?;
        Self::new(start, end)
    }

    /// Infallible variant for durations already known to be positive.
    /// Lengths are clamped to `1..=MAX_DURATION_MINUTES` and the end
    /// saturates at the latest representable instant.
    pub(crate) fn spanning(start: DateTime<Utc>, minutes: i64) -> Self {
        let length = Duration::minutes(minutes.clamp(1, MAX_DURATION_MINUTES));
        let end = start.checked_add_signed(length).unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self { start, end }
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Half-open overlap test.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 10, hour, minute, 0).unwrap()
    }

    #[test]
    fn touching_intervals_do_not_overlap() {
        let morning = TimeInterval::new(at(10, 0), at(11, 0)).unwrap();
        let next = TimeInterval::new(at(11, 0), at(12, 0)).unwrap();
        assert!(!morning.overlaps(&next));
        assert!(!next.overlaps(&morning));
    }

    #[test]
    fn partial_and_nested_overlaps_are_detected() {
        let base = TimeInterval::new(at(10, 0), at(11, 0)).unwrap();
        let partial = TimeInterval::from_minutes(at(10, 30), 30).unwrap();
        let nested = TimeInterval::from_minutes(at(10, 15), 15).unwrap();
        assert!(base.overlaps(&partial));
        assert!(partial.overlaps(&base));
        assert!(base.overlaps(&nested));
        assert!(nested.overlaps(&base));
    }

    #[test]
    fn empty_interval_is_rejected() {
        assert!(TimeInterval::new(at(10, 0), at(10, 0)).is_err());
        assert!(TimeInterval::from_minutes(at(10, 0), -5).is_err());
    }

    #[test]
    fn huge_durations_are_errors_not_panics() {
        assert!(matches!(
            TimeInterval::from_minutes(at(10, 0), 1_000_000_000_000_000),
            Err(AgendaError::Validation(_))
        ));
        assert!(TimeInterval::from_minutes(DateTime::<Utc>::MAX_UTC, 60).is_err());
    }

    #[test]
    fn spanning_clamps_length_and_saturates() {
        let capped = TimeInterval::spanning(at(10, 0), i64::MAX);
        assert_eq!(capped.duration(), Duration::minutes(MAX_DURATION_MINUTES));

        let near_end = DateTime::<Utc>::MAX_UTC - Duration::minutes(10);
        assert_eq!(TimeInterval::spanning(near_end, 60).end(), DateTime::<Utc>::MAX_UTC);
    }

    #[test]
    fn contains_excludes_end() {
        let slot = TimeInterval::from_minutes(at(9, 0), 60).unwrap();
        assert!(slot.contains(at(9, 0)));
        assert!(!slot.contains(at(10, 0)));
        assert_eq!(slot.duration(), Duration::minutes(60));
    }
}
