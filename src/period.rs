//! A span of time in calendar units.

use crate::arith::{safe_add, safe_negate};
use crate::error::Result;


/// A **period**: a bundle of calendar-unit amounts, from years down to
/// milliseconds.
///
/// A period has no fixed millisecond length; what it amounts to depends
/// on where it is applied. Adding one month to the 28th of February lands
/// on the 28th of March, a span of 28 or 29 days depending on the year.
/// Components keep their signs independently, so a period may mix
/// positive and negative amounts.
#[derive(PartialEq, Eq, Hash, Debug, Copy, Clone, Default)]
pub struct Period {
    years: i64,
    months: i64,
    weeks: i64,
    days: i64,
    hours: i64,
    minutes: i64,
    seconds: i64,
    millis: i64,
}

impl Period {

    /// A period of nothing at all.
    pub fn zero() -> Self {
        Self::default()
    }

    /// A period with every component given explicitly.
    #[allow(clippy::too_many_arguments)]
    pub fn new(years: i64, months: i64, weeks: i64, days: i64,
               hours: i64, minutes: i64, seconds: i64, millis: i64) -> Self {
        Self { years, months, weeks, days, hours, minutes, seconds, millis }
    }

    pub fn years(&self) -> i64 { self.years }
    pub fn months(&self) -> i64 { self.months }
    pub fn weeks(&self) -> i64 { self.weeks }
    pub fn days(&self) -> i64 { self.days }
    pub fn hours(&self) -> i64 { self.hours }
    pub fn minutes(&self) -> i64 { self.minutes }
    pub fn seconds(&self) -> i64 { self.seconds }
    pub fn millis(&self) -> i64 { self.millis }

    pub fn with_years(self, years: i64) -> Self { Self { years, ..self } }
    pub fn with_months(self, months: i64) -> Self { Self { months, ..self } }
    pub fn with_weeks(self, weeks: i64) -> Self { Self { weeks, ..self } }
    pub fn with_days(self, days: i64) -> Self { Self { days, ..self } }
    pub fn with_hours(self, hours: i64) -> Self { Self { hours, ..self } }
    pub fn with_minutes(self, minutes: i64) -> Self { Self { minutes, ..self } }
    pub fn with_seconds(self, seconds: i64) -> Self { Self { seconds, ..self } }
    pub fn with_millis(self, millis: i64) -> Self { Self { millis, ..self } }

    /// Whether every component is zero.
    pub fn is_zero(&self) -> bool {
        *self == Self::zero()
    }

    /// The component-wise sum of two periods.
    pub fn plus(&self, other: &Period) -> Result<Period> {
        Ok(Self {
            years: safe_add(self.years, other.years)?,
            months: safe_add(self.months, other.months)?,
            weeks: safe_add(self.weeks, other.weeks)?,
            days: safe_add(self.days, other.days)?,
            hours: safe_add(self.hours, other.hours)?,
            minutes: safe_add(self.minutes, other.minutes)?,
            seconds: safe_add(self.seconds, other.seconds)?,
            millis: safe_add(self.millis, other.millis)?,
        })
    }

    /// This period with every component's sign flipped.
    pub fn negated(&self) -> Result<Period> {
        Ok(Self {
            years: safe_negate(self.years)?,
            months: safe_negate(self.months)?,
            weeks: safe_negate(self.weeks)?,
            days: safe_negate(self.days)?,
            hours: safe_negate(self.hours)?,
            minutes: safe_negate(self.minutes)?,
            seconds: safe_negate(self.seconds)?,
            millis: safe_negate(self.millis)?,
        })
    }
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn builders_compose() {
        let period = Period::zero().with_years(1).with_days(-2);
        assert_eq!(period.years(), 1);
        assert_eq!(period.days(), -2);
        assert_eq!(period.months(), 0);
        assert!(!period.is_zero());
    }

    #[test]
    fn negation() {
        let period = Period::zero().with_months(3).with_minutes(-30);
        let negated = period.negated().unwrap();
        assert_eq!(negated.months(), -3);
        assert_eq!(negated.minutes(), 30);
        assert!(Period::zero().with_years(i64::MIN).negated().is_err());
    }

    #[test]
    fn addition() {
        let a = Period::zero().with_weeks(2);
        let b = Period::zero().with_weeks(1).with_hours(5);
        let sum = a.plus(&b).unwrap();
        assert_eq!(sum.weeks(), 3);
        assert_eq!(sum.hours(), 5);
    }
}
