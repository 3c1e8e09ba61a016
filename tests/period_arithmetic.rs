//! Period addition and measurement against the ISO calendar.

use chronology::cal::iso;
use chronology::field::{DateTimeField, DurationField};
use chronology::Period;


/// 2007-03-31T00:00:00Z.
const MARCH_31: i64 = 1_175_299_200_000;

/// 2007-04-30T00:00:00Z.
const APRIL_30: i64 = 1_177_891_200_000;

/// 2007-05-01T00:00:00Z.
const MAY_1: i64 = 1_177_977_600_000;

#[test]
fn larger_units_are_applied_first() {
    let chrono = iso::instance_utc();
    let period = Period::zero().with_months(1).with_days(1);

    // a month from the 31st of March clamps to the 30th of April, and
    // only then does the day move us into May
    assert_eq!(chrono.add_period(&period, MARCH_31, 1), Ok(MAY_1));

    let month_only = Period::zero().with_months(1);
    assert_eq!(chrono.add_period(&month_only, MARCH_31, 1), Ok(APRIL_30));
}

#[test]
fn scalar_scales_every_component() {
    let chrono = iso::instance_utc();
    let period = Period::zero().with_months(1).with_days(1);
    assert_eq!(chrono.add_period(&period, MAY_1, -1), Ok(MARCH_31));

    let week = Period::zero().with_weeks(1);
    let fortnight_on = chrono.add_period(&week, MARCH_31, 2).unwrap();
    assert_eq!(chrono.day_of_month().get(fortnight_on), 14);
    assert_eq!(chrono.month_of_year().get(fortnight_on), 4);
}

#[test]
fn measuring_between_instants() {
    let chrono = iso::instance_utc();
    let between = chrono.period_between(MARCH_31, MAY_1).unwrap();
    assert_eq!(between, Period::zero().with_months(1).with_days(1));

    let reversed = chrono.period_between(MAY_1, MARCH_31).unwrap();
    assert_eq!(reversed, Period::zero().with_months(-1).with_days(-1));
}

#[test]
fn measuring_mixed_units() {
    let chrono = iso::instance_utc();
    let start = chrono.datetime_millis_at(2001, 2, 3, 4, 5, 6, 0).unwrap();
    let end = chrono.datetime_millis_at(2003, 4, 17, 6, 35, 6, 250).unwrap();

    let between = chrono.period_between(start, end).unwrap();
    assert_eq!(between.years(), 2);
    assert_eq!(between.months(), 2);
    assert_eq!(between.weeks(), 2);
    assert_eq!(between.days(), 0);
    assert_eq!(between.hours(), 2);
    assert_eq!(between.minutes(), 30);
    assert_eq!(between.seconds(), 0);
    assert_eq!(between.millis(), 250);

    // applying the measured period to the start lands on the end
    assert_eq!(chrono.add_period(&between, start, 1), Ok(end));
}

#[test]
fn month_difference_inverts_clamped_addition() {
    let chrono = iso::instance_utc();
    let jan31 = chrono.datetime_millis(2007, 1, 31, 0).unwrap();
    let feb28 = chrono.months().add(jan31, 1).unwrap();
    assert_eq!(chrono.day_of_month().get(feb28), 28);

    // the clamped month lands a whole month on, and measures back as one
    assert_eq!(chrono.months().difference(feb28, jan31), Ok(1));
    assert_eq!(chrono.period_between(jan31, feb28), Ok(Period::zero().with_months(1)));
}

#[test]
fn leap_day_anniversaries() {
    let chrono = iso::instance_utc();
    let feb29 = chrono.datetime_millis(2012, 2, 29, 0).unwrap();
    let year_on = chrono.add_period(&Period::zero().with_years(1), feb29, 1).unwrap();
    assert_eq!(chrono.month_of_year().get(year_on), 2);
    assert_eq!(chrono.day_of_month().get(year_on), 28);

    let four_years = chrono.add_period(&Period::zero().with_years(4), feb29, 1).unwrap();
    assert_eq!(chrono.day_of_month().get(four_years), 29);
}

#[test]
fn plain_duration_addition_ignores_the_calendar() {
    let chrono = iso::instance_utc();
    assert_eq!(chrono.add_duration(MARCH_31, 86_400_000, 30), Ok(APRIL_30));
    assert!(chrono.add_duration(i64::MAX, 1, 1).is_err());
}
