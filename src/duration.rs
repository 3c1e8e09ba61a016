//! An exact length of time in milliseconds, with no calendar attached.

use crate::arith::{safe_add, safe_subtract, safe_multiply, safe_negate};
use crate::error::Result;
use crate::{MILLIS_PER_SECOND, MILLIS_PER_MINUTE, MILLIS_PER_HOUR, MILLIS_PER_DAY};


/// A **duration**: a signed number of milliseconds.
///
/// Unlike a [`Period`](crate::Period), a duration knows nothing about
/// calendars: a duration of 86,400,000 milliseconds is exactly that, even
/// across a daylight-saving cutover where the calendar day is shorter.
///
/// ### Examples
///
/// ```
/// use chronology::Duration;
///
/// let d = Duration::of_standard_days(2).unwrap();
/// assert_eq!(d.standard_hours(), 48);
/// ```
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Copy, Clone, Default)]
pub struct Duration {
    millis: i64,
}

impl Duration {

    /// A duration of no time at all.
    pub fn zero() -> Self {
        Self { millis: 0 }
    }

    /// A duration of the given number of milliseconds.
    pub fn of_millis(millis: i64) -> Self {
        Self { millis }
    }

    /// A duration of the given number of seconds.
    pub fn of_standard_seconds(seconds: i64) -> Result<Self> {
        Ok(Self { millis: safe_multiply(seconds, MILLIS_PER_SECOND)? })
    }

    /// A duration of the given number of minutes.
    pub fn of_standard_minutes(minutes: i64) -> Result<Self> {
        Ok(Self { millis: safe_multiply(minutes, MILLIS_PER_MINUTE)? })
    }

    /// A duration of the given number of hours.
    pub fn of_standard_hours(hours: i64) -> Result<Self> {
        Ok(Self { millis: safe_multiply(hours, MILLIS_PER_HOUR)? })
    }

    /// A duration of the given number of 24-hour days.
    pub fn of_standard_days(days: i64) -> Result<Self> {
        Ok(Self { millis: safe_multiply(days, MILLIS_PER_DAY)? })
    }

    /// The length in milliseconds.
    pub fn millis(self) -> i64 {
        self.millis
    }

    /// The number of whole standard seconds, truncating towards zero.
    pub fn standard_seconds(self) -> i64 {
        self.millis / MILLIS_PER_SECOND
    }

    /// The number of whole standard minutes.
    pub fn standard_minutes(self) -> i64 {
        self.millis / MILLIS_PER_MINUTE
    }

    /// The number of whole standard hours.
    pub fn standard_hours(self) -> i64 {
        self.millis / MILLIS_PER_HOUR
    }

    /// The number of whole standard days.
    pub fn standard_days(self) -> i64 {
        self.millis / MILLIS_PER_DAY
    }

    /// Whether this duration is zero.
    pub fn is_zero(self) -> bool {
        self.millis == 0
    }

    /// The sum of two durations.
    pub fn plus(self, other: Duration) -> Result<Duration> {
        Ok(Self { millis: safe_add(self.millis, other.millis)? })
    }

    /// The difference of two durations.
    pub fn minus(self, other: Duration) -> Result<Duration> {
        Ok(Self { millis: safe_subtract(self.millis, other.millis)? })
    }

    /// This duration with its sign flipped.
    pub fn negated(self) -> Result<Duration> {
        Ok(Self { millis: safe_negate(self.millis)? })
    }
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn conversions_truncate() {
        let d = Duration::of_millis(-MILLIS_PER_MINUTE - 1);
        assert_eq!(d.standard_minutes(), -1);
        assert_eq!(d.standard_seconds(), -60);
    }

    #[test]
    fn construction_checks_overflow() {
        assert!(Duration::of_standard_days(i64::MAX / 2).is_err());
        assert_eq!(Duration::of_standard_hours(2).unwrap().millis(), 2 * MILLIS_PER_HOUR);
    }

    #[test]
    fn arithmetic() {
        let a = Duration::of_standard_seconds(90).unwrap();
        let b = Duration::of_standard_seconds(30).unwrap();
        assert_eq!(a.minus(b).unwrap().standard_minutes(), 1);
        assert!(Duration::of_millis(i64::MAX).plus(Duration::of_millis(1)).is_err());
        assert!(Duration::of_millis(i64::MIN).negated().is_err());
    }
}
