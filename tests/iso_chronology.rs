//! Reading and building instants with the ISO chronology in UTC.

use chronology::cal::iso;
use chronology::field::DateTimeField;
use chronology::partial::Partial;


/// 2001-02-03T04:05:06Z, a Saturday.
const SOME_SATURDAY: i64 = 981_173_106_000;

#[test]
fn fields_of_a_known_instant() {
    let chrono = iso::instance_utc();

    assert_eq!(chrono.year().get(SOME_SATURDAY), 2001);
    assert_eq!(chrono.month_of_year().get(SOME_SATURDAY), 2);
    assert_eq!(chrono.day_of_month().get(SOME_SATURDAY), 3);
    assert_eq!(chrono.day_of_week().get(SOME_SATURDAY), 6);
    assert_eq!(chrono.day_of_year().get(SOME_SATURDAY), 34);

    assert_eq!(chrono.hour_of_day().get(SOME_SATURDAY), 4);
    assert_eq!(chrono.minute_of_hour().get(SOME_SATURDAY), 5);
    assert_eq!(chrono.second_of_minute().get(SOME_SATURDAY), 6);
    assert_eq!(chrono.millis_of_second().get(SOME_SATURDAY), 0);
    assert_eq!(chrono.millis_of_day().get(SOME_SATURDAY), 14_706_000);

    assert_eq!(chrono.weekyear().get(SOME_SATURDAY), 2001);
    assert_eq!(chrono.week_of_weekyear().get(SOME_SATURDAY), 5);
}

#[test]
fn building_a_known_instant() {
    let chrono = iso::instance_utc();
    assert_eq!(chrono.datetime_millis_at(2001, 2, 3, 4, 5, 6, 0), Ok(SOME_SATURDAY));
    assert_eq!(chrono.datetime_millis(2001, 2, 3, 14_706_000), Ok(SOME_SATURDAY));
    assert_eq!(chrono.datetime_millis(1970, 1, 1, 0), Ok(0));
}

#[test]
fn building_rejects_impossible_dates() {
    let chrono = iso::instance_utc();
    assert!(chrono.datetime_millis(2007, 2, 30, 0).is_err());
    assert!(chrono.datetime_millis(2007, 13, 1, 0).is_err());
    assert!(chrono.datetime_millis(2007, 0, 1, 0).is_err());
    assert!(chrono.datetime_millis(2007, 2, 1, -1).is_err());
    assert!(chrono.datetime_millis_at(2007, 2, 1, 24, 0, 0, 0).is_err());
    // the leap day exists only every fourth year
    assert!(chrono.datetime_millis(2008, 2, 29, 0).is_ok());
    assert!(chrono.datetime_millis(2007, 2, 29, 0).is_err());
}

#[test]
fn eras_before_year_one() {
    let chrono = iso::instance_utc();
    let year_zero = chrono.year().set(0, 0).unwrap();
    assert_eq!(chrono.era().get(year_zero), 0);
    assert_eq!(chrono.year_of_era().get(year_zero), 1);

    let year_minus_one = chrono.year().set(0, -1).unwrap();
    assert_eq!(chrono.year_of_era().get(year_minus_one), 2);
}

#[test]
fn clockhours_show_midnight_as_24() {
    let chrono = iso::instance_utc();
    let midnight = chrono.datetime_millis(2001, 2, 3, 0).unwrap();
    assert_eq!(chrono.hour_of_day().get(midnight), 0);
    assert_eq!(chrono.clockhour_of_day().get(midnight), 24);
    assert_eq!(chrono.halfday_of_day().get(midnight), 0);
    assert_eq!(chrono.halfday_of_day().get(SOME_SATURDAY), 0);
    assert_eq!(chrono.hour_of_halfday().get(SOME_SATURDAY), 4);
}

#[test]
fn partial_validation() {
    let chrono = iso::instance_utc();
    assert!(chrono.validate(&Partial::date(2008, 2, 29)).is_ok());
    assert!(chrono.validate(&Partial::date(2007, 2, 29)).is_err());
    assert!(chrono.validate(&Partial::date(2007, 0, 1)).is_err());
    assert!(chrono.validate(&Partial::time(23, 59, 59, 999)).is_ok());
    assert!(chrono.validate(&Partial::time(24, 0, 0, 0)).is_err());
}

#[test]
fn partials_set_in_declared_order() {
    let chrono = iso::instance_utc();
    let date = Partial::date(2008, 2, 29);
    let result = chrono.set_partial(&date, SOME_SATURDAY).unwrap();
    assert_eq!(chrono.datetime_millis_at(2008, 2, 29, 4, 5, 6, 0), Ok(result));

    let values = chrono.partial_values(&date, SOME_SATURDAY).unwrap();
    assert_eq!(values, vec![2001, 2, 3]);
}

#[test]
fn chronologies_compare_by_rules_and_zone() {
    use chronology::DateTimeZone;
    use chronology::cal::gregorian;

    let utc = iso::instance_utc();
    assert_eq!(utc, iso::instance(DateTimeZone::utc()));
    assert_ne!(utc, gregorian::instance_utc());

    let offset = DateTimeZone::for_offset_hours_minutes(5, 30).unwrap();
    let zoned = iso::instance(offset);
    assert_ne!(utc, zoned);
    assert_eq!(zoned.with_utc(), utc);
    assert_eq!(utc.to_string(), "ISOChronology[UTC]");
    assert_eq!(zoned.to_string(), "ISOChronology[+05:30]");
}
