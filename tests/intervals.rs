//! Intervals measured through a chronology.

use chronology::cal::iso;
use chronology::zone::Timespan;
use chronology::{DateTimeZone, Interval, Period};

const HOUR: i64 = 3_600_000;

#[test]
fn a_calendar_month_is_not_a_fixed_duration() {
    let chrono = iso::instance_utc();
    let start = chrono.datetime_millis(2007, 2, 1, 0).unwrap();
    let end = chrono.datetime_millis(2007, 3, 1, 0).unwrap();

    let february = Interval::new(start, end, chrono).unwrap();
    assert_eq!(february.to_period().unwrap(), Period::zero().with_months(1));
    assert_eq!(february.to_duration().unwrap().standard_days(), 28);
}

#[test]
fn a_cutover_day_is_one_day_but_23_hours() {
    let zone = DateTimeZone::precalculated(
        "Test/Summer",
        Timespan { offset: 0, standard_offset: 0 },
        vec![
            (1_174_784_400_000, Timespan { offset: HOUR, standard_offset: 0 }),
            (1_193_533_200_000, Timespan { offset: 0, standard_offset: 0 }),
        ],
    ).unwrap();
    let chrono = iso::instance(zone);

    let start = chrono.datetime_millis(2007, 3, 25, 0).unwrap();
    let end = chrono.datetime_millis(2007, 3, 26, 0).unwrap();
    let cutover_day = Interval::new(start, end, chrono).unwrap();

    assert_eq!(cutover_day.to_period().unwrap(), Period::zero().with_days(1));
    assert_eq!(cutover_day.to_duration().unwrap().standard_hours(), 23);
}

#[test]
fn chaining_intervals_over_the_timeline() {
    let chrono = iso::instance_utc();
    let q1 = Interval::new(chrono.datetime_millis(2007, 1, 1, 0).unwrap(),
                           chrono.datetime_millis(2007, 4, 1, 0).unwrap(),
                           chrono.clone()).unwrap();
    let q2 = Interval::new(chrono.datetime_millis(2007, 4, 1, 0).unwrap(),
                           chrono.datetime_millis(2007, 7, 1, 0).unwrap(),
                           chrono.clone()).unwrap();
    let summer = Interval::new(chrono.datetime_millis(2007, 6, 1, 0).unwrap(),
                               chrono.datetime_millis(2007, 9, 1, 0).unwrap(),
                               chrono.clone()).unwrap();

    assert!(q1.abuts(&q2));
    assert!(!q1.overlaps(&q2));
    assert!(q2.overlaps(&summer));

    let june = q2.overlap(&summer).unwrap();
    assert_eq!(june.to_period().unwrap(), Period::zero().with_months(1));

    let gap = q1.gap(&summer).unwrap();
    assert_eq!(gap.start(), q1.end());
    assert_eq!(gap.end(), summer.start());
}
