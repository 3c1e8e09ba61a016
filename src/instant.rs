//! A point on the UTC millisecond timeline.

use crate::arith::{safe_add, safe_subtract};
use crate::duration::Duration;
use crate::error::Result;
use crate::utils;


/// An **instant**: a number of milliseconds since 1970-01-01T00:00:00Z,
/// with no calendar or zone attached.
///
/// ### Examples
///
/// ```
/// use chronology::{Duration, Instant};
///
/// let launch = Instant::of(981_173_106_000);
/// let checkpoint = launch.plus(Duration::of_standard_hours(2).unwrap()).unwrap();
/// assert!(launch.is_before(checkpoint));
/// ```
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Copy, Clone, Default)]
pub struct Instant {
    millis: i64,
}

impl Instant {

    /// The instant at the given number of epoch milliseconds.
    pub fn of(millis: i64) -> Self {
        Self { millis }
    }

    /// The current instant, as told by the clock that
    /// [`utils`] is configured with.
    pub fn now() -> Self {
        Self { millis: utils::current_time_millis() }
    }

    /// This instant's epoch milliseconds.
    pub fn millis(self) -> i64 {
        self.millis
    }

    /// This instant moved forward by a duration.
    pub fn plus(self, duration: Duration) -> Result<Instant> {
        Ok(Self { millis: safe_add(self.millis, duration.millis())? })
    }

    /// This instant moved back by a duration.
    pub fn minus(self, duration: Duration) -> Result<Instant> {
        Ok(Self { millis: safe_subtract(self.millis, duration.millis())? })
    }

    /// Whether this instant is strictly earlier than the other.
    pub fn is_before(self, other: Instant) -> bool {
        self.millis < other.millis
    }

    /// Whether this instant is strictly later than the other.
    pub fn is_after(self, other: Instant) -> bool {
        self.millis > other.millis
    }
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn ordering() {
        let earlier = Instant::of(100);
        let later = Instant::of(200);
        assert!(earlier.is_before(later));
        assert!(later.is_after(earlier));
        assert!(earlier < later);
    }

    #[test]
    fn shifting() {
        let instant = Instant::of(1_000);
        let shifted = instant.plus(Duration::of_standard_seconds(2).unwrap()).unwrap();
        assert_eq!(shifted.millis(), 3_000);
        assert!(Instant::of(i64::MAX).plus(Duration::of_millis(1)).is_err());
    }
}
