//! Process-wide utilities: the pluggable clock behind "now", default
//! substitution for optional arguments, and partial inspection helpers.

use std::sync::RwLock;

use lazy_static::lazy_static;
use tracing::trace;

use crate::cal::{iso, Chronology};
use crate::duration::Duration;
use crate::field::DurationFieldType;
use crate::partial::Partial;
use crate::period::Period;
use crate::system;
use crate::zone::DateTimeZone;


/// Where the current time comes from.
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub enum MillisProvider {

    /// The operating system clock.
    System,

    /// A frozen instant, for tests.
    Fixed(i64),

    /// The system clock shifted by a constant number of milliseconds.
    Offset(i64),
}

lazy_static! {
    static ref PROVIDER: RwLock<MillisProvider> = RwLock::new(MillisProvider::System);
}

/// The current time in epoch milliseconds, from whichever provider is
/// installed.
pub fn current_time_millis() -> i64 {
    let provider = PROVIDER.read().unwrap_or_else(|e| e.into_inner());
    match *provider {
        MillisProvider::System => system::sys_time_millis(),
        MillisProvider::Fixed(millis) => millis,
        MillisProvider::Offset(offset) => system::sys_time_millis().saturating_add(offset),
    }
}

fn install(provider: MillisProvider) {
    trace!(?provider, "current time provider changed");
    let mut slot = PROVIDER.write().unwrap_or_else(|e| e.into_inner());
    *slot = provider;
}

/// Freezes the clock at the given instant until another provider is
/// installed.
pub fn set_current_millis_fixed(millis: i64) {
    install(MillisProvider::Fixed(millis));
}

/// Shifts the system clock by a constant offset.
pub fn set_current_millis_offset(offset_millis: i64) {
    install(MillisProvider::Offset(offset_millis));
}

/// Restores the real system clock.
pub fn set_current_millis_system() {
    install(MillisProvider::System);
}

/// The given chronology, or ISO in UTC when absent.
pub fn chronology_or_default(chronology: Option<Chronology>) -> Chronology {
    chronology.unwrap_or_else(iso::instance_utc)
}

/// The given zone, or UTC when absent.
pub fn zone_or_default(zone: Option<DateTimeZone>) -> DateTimeZone {
    zone.unwrap_or_else(DateTimeZone::utc)
}

/// The given duration, or zero when absent.
pub fn duration_or_zero(duration: Option<Duration>) -> Duration {
    duration.unwrap_or_else(Duration::zero)
}

/// The given period, or zero when absent.
pub fn period_or_zero(period: Option<Period>) -> Period {
    period.unwrap_or_else(Period::zero)
}

/// Whether a partial's fields form an unbroken chain from largest to
/// smallest: each field after the first must wrap within the previous
/// field's unit. A year-month-day is contiguous; a year-day-of-month is
/// not, since day-of-month wraps within months, not years.
pub fn is_contiguous(partial: &Partial) -> bool {
    let mut last: Option<DurationFieldType> = None;
    for index in 0..partial.size() {
        let field_type = match partial.field_type(index) {
            Ok(t) => t,
            Err(_) => return false,
        };
        if let Some(last_unit) = last {
            if field_type.range_duration_type() != Some(last_unit) {
                return false;
            }
        }
        last = Some(field_type.duration_type());
    }
    true
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::field::DateTimeFieldType::*;

    #[test]
    fn fixed_clock() {
        set_current_millis_fixed(981_173_106_000);
        assert_eq!(current_time_millis(), 981_173_106_000);
        set_current_millis_system();
    }

    #[test]
    fn defaults() {
        assert_eq!(chronology_or_default(None), iso::instance_utc());
        assert_eq!(zone_or_default(None), DateTimeZone::utc());
        assert!(duration_or_zero(None).is_zero());
        assert!(period_or_zero(None).is_zero());
    }

    #[test]
    fn contiguity() {
        assert!(is_contiguous(&Partial::date(2007, 5, 1)));
        assert!(is_contiguous(&Partial::time(12, 30, 0, 0)));

        let gap = Partial::new(vec![Year, DayOfMonth], vec![2007, 14]).unwrap();
        assert!(!is_contiguous(&gap));

        let full = Partial::new(
            vec![Year, MonthOfYear, DayOfMonth, HourOfDay, MinuteOfHour],
            vec![2007, 5, 1, 12, 30]).unwrap();
        assert!(is_contiguous(&full));
    }
}
