//! Half-open spans of the timeline.

use crate::arith::safe_subtract;
use crate::cal::Chronology;
use crate::duration::Duration;
use crate::error::{Error, Result};
use crate::period::Period;


/// An **interval**: the half-open span `[start, end)` of UTC instants,
/// interpreted through a chronology.
///
/// The start is part of the interval and the end is not, so back-to-back
/// intervals cover the timeline with no milliseconds shared or missed. An
/// interval may be empty, in which case it contains nothing and overlaps
/// nothing.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Interval {
    start: i64,
    end: i64,
    chronology: Chronology,
}

impl Interval {

    /// An interval between two instants; the end must not precede the
    /// start.
    pub fn new(start: i64, end: i64, chronology: Chronology) -> Result<Self> {
        if end < start {
            return Err(Error::IllegalInterval { start, end });
        }
        Ok(Self { start, end, chronology })
    }

    /// The first instant inside the interval.
    pub fn start(&self) -> i64 {
        self.start
    }

    /// The first instant after the interval.
    pub fn end(&self) -> i64 {
        self.end
    }

    /// The chronology the interval's endpoints are read with.
    pub fn chronology(&self) -> &Chronology {
        &self.chronology
    }

    /// Whether the instant lies inside the interval. The start is
    /// included, the end excluded; an empty interval contains nothing.
    pub fn contains(&self, instant: i64) -> bool {
        self.start <= instant && instant < self.end
    }

    /// Whether the other interval lies entirely inside this one.
    pub fn contains_interval(&self, other: &Interval) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Whether the two intervals share any instant. Empty intervals
    /// overlap nothing, even when they sit inside the other interval.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Whether the intervals touch without overlapping: one's end is the
    /// other's start.
    pub fn abuts(&self, other: &Interval) -> bool {
        other.end == self.start || self.end == other.start
    }

    /// The span between the two intervals, or `None` when they overlap or
    /// abut.
    pub fn gap(&self, other: &Interval) -> Option<Interval> {
        if self.start > other.end {
            Some(Self { start: other.end, end: self.start, chronology: self.chronology.clone() })
        }
        else if other.start > self.end {
            Some(Self { start: self.end, end: other.start, chronology: self.chronology.clone() })
        }
        else {
            None
        }
    }

    /// The span the two intervals share, or `None` when they do not
    /// overlap.
    pub fn overlap(&self, other: &Interval) -> Option<Interval> {
        if !self.overlaps(other) {
            return None;
        }
        Some(Self {
            start: self.start.max(other.start),
            end: self.end.min(other.end),
            chronology: self.chronology.clone(),
        })
    }

    /// The interval's exact length.
    pub fn to_duration(&self) -> Result<Duration> {
        Ok(Duration::of_millis(safe_subtract(self.end, self.start)?))
    }

    /// The interval's length in calendar units, measured with its
    /// chronology from the start.
    pub fn to_period(&self) -> Result<Period> {
        self.chronology.period_between(self.start, self.end)
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::cal::iso;

    fn interval(start: i64, end: i64) -> Interval {
        Interval::new(start, end, iso::instance_utc()).unwrap()
    }

    #[test]
    fn endpoints_are_half_open() {
        let span = interval(100, 200);
        assert!(span.contains(100));
        assert!(span.contains(199));
        assert!(!span.contains(200));
        assert!(!span.contains(99));
    }

    #[test]
    fn backwards_intervals_are_rejected() {
        assert!(Interval::new(200, 100, iso::instance_utc()).is_err());
        assert!(Interval::new(100, 100, iso::instance_utc()).is_ok());
    }

    #[test]
    fn empty_intervals_overlap_nothing() {
        let empty = interval(150, 150);
        let span = interval(100, 200);
        assert!(!empty.overlaps(&span));
        assert!(!span.overlaps(&empty));
        assert!(span.contains_interval(&empty));
        assert!(!empty.contains(150));
    }

    #[test]
    fn gaps_and_overlaps() {
        let a = interval(0, 100);
        let b = interval(150, 250);
        let gap = a.gap(&b).unwrap();
        assert_eq!((gap.start(), gap.end()), (100, 150));
        assert!(a.overlap(&b).is_none());

        let c = interval(50, 180);
        let shared = a.overlap(&c).unwrap();
        assert_eq!((shared.start(), shared.end()), (50, 100));
        assert!(a.gap(&c).is_none());
    }

    #[test]
    fn abutting() {
        let a = interval(0, 100);
        let b = interval(100, 200);
        assert!(a.abuts(&b));
        assert!(b.abuts(&a));
        assert!(!a.overlaps(&b));
        assert!(a.gap(&b).is_none());
    }
}
