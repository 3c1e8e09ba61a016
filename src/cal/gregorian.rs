//! The proleptic Gregorian calendar: the raw year, month, week, and day
//! arithmetic every chronology is built on, and the Gregorian chronology
//! itself.
//!
//! All functions here work on *local* millisecond instants; the zone
//! layer is applied separately. Dates are resolved through the 400-year
//! leap cycle of 146,097 days, counted from 1st March 2000 so that leap
//! days land at the very end of every cycle.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use lazy_static::lazy_static;
use tracing::trace;

use crate::arith::{safe_add, safe_subtract, safe_multiply, safe_negate, floor_div, floor_mod, verify_value_bounds};
use crate::cal::fields::*;
use crate::cal::{Chronology, ChronologyKind, FieldTable};
use crate::error::Result;
use crate::field::DateTimeFieldType as T;
use crate::field::DurationFieldType as D;
use crate::field::{DateTimeField, DurationField,
                   PreciseDurationField, ScaledDurationField, UnsupportedDurationField,
                   PreciseDateTimeField, DividedDateTimeField, RemainderDateTimeField, ZeroIsMaxField};
use crate::zone::DateTimeZone;
use crate::{MILLIS_PER_SECOND, MILLIS_PER_MINUTE, MILLIS_PER_HOUR, MILLIS_PER_DAY, MILLIS_PER_WEEK};


/// The first year whose every millisecond fits the timeline.
pub const MIN_YEAR: i64 = -292_275_054;

/// The last year whose every millisecond fits the timeline.
pub const MAX_YEAR: i64 = 292_278_993;

const DAYS_IN_400Y: i64 = 146_097;
const DAYS_IN_100Y: i64 = 36_524;
const DAYS_IN_4Y: i64 = 1_461;

/// Days from the epoch to 2000-03-01, the cycle origin.
const EPOCH_SHIFT_DAYS: i64 = 11_017;

/// Cumulative days before each month in a non-leap year.
const DAYS_BEFORE_MONTH: [i64; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

/// Offset into a non-leap year of the day after the 28th of February.
const FEB_29_MILLIS: i64 = (31 + 28) * MILLIS_PER_DAY;


/// Whether the given year has a 29th of February.
pub fn is_leap_year(year: i64) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// The number of days in the given year.
pub fn days_in_year(year: i64) -> i64 {
    if is_leap_year(year) { 366 } else { 365 }
}

/// The number of days in the given month of the given year.
pub fn days_in_year_month(year: i64, month: i64) -> i64 {
    match month {
        2 => if is_leap_year(year) { 29 } else { 28 },
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// The calendar date holding the given day number, counted from the
/// epoch. Works for any `i64` day.
pub fn ymd_from_days(days: i64) -> (i64, i64, i64) {
    let shifted = days - EPOCH_SHIFT_DAYS;

    let cycles_400 = floor_div(shifted, DAYS_IN_400Y);
    let mut rem = shifted - cycles_400 * DAYS_IN_400Y;

    // the last day of the cycle is a leap day, so the century and year
    // divisions both need clamping there
    let cycles_100 = (rem / DAYS_IN_100Y).min(3);
    rem -= cycles_100 * DAYS_IN_100Y;
    let cycles_4 = rem / DAYS_IN_4Y;
    rem -= cycles_4 * DAYS_IN_4Y;
    let years = (rem / 365).min(3);
    rem -= years * 365;

    let mut year = 400 * cycles_400 + 100 * cycles_100 + 4 * cycles_4 + years + 2000;

    // rem is now the day offset within a year that starts on 1st March
    let march_month = (5 * rem + 2) / 153;
    let day = rem - (153 * march_month + 2) / 5 + 1;
    let mut month = march_month + 3;
    if month > 12 {
        month -= 12;
        year += 1;
    }

    (year, month, day)
}

/// The number of days from the epoch to the 1st of January of the given
/// year.
pub fn days_before_year(year: i64) -> i64 {
    let prior = year - 1;
    365 * prior + floor_div(prior, 4) - floor_div(prior, 100) + floor_div(prior, 400) - 719_162
}

/// The day number of the given calendar date, counted from the epoch.
/// The month must already have been validated into 1..=12.
pub(crate) fn days_from_ymd(year: i64, month: i64, day: i64) -> i64 {
    let leap = if is_leap_year(year) && month > 2 { 1 } else { 0 };
    days_before_year(year) + DAYS_BEFORE_MONTH[(month - 1) as usize] + leap + day - 1
}

/// The calendar date holding the given local instant.
pub fn ymd_of(instant: i64) -> (i64, i64, i64) {
    ymd_from_days(floor_div(instant, MILLIS_PER_DAY))
}

/// The year holding the given local instant.
pub fn year_of(instant: i64) -> i64 {
    ymd_of(instant).0
}

/// The local instant at midnight starting the given calendar date.
/// The month must already have been validated into 1..=12.
pub(crate) fn ymd_millis(year: i64, month: i64, day: i64) -> Result<i64> {
    safe_multiply(days_from_ymd(year, month, day), MILLIS_PER_DAY)
}

/// The local instant at midnight starting the given year.
pub fn year_start_millis(year: i64) -> Result<i64> {
    safe_multiply(days_before_year(year), MILLIS_PER_DAY)
}

/// The one-based day of year of the given local instant.
pub fn day_of_year_of(instant: i64) -> i64 {
    let days = floor_div(instant, MILLIS_PER_DAY);
    days - days_before_year(year_of(instant)) + 1
}

/// The ISO day of week of the given local instant, with Monday as 1 and
/// Sunday as 7.
pub fn day_of_week(instant: i64) -> i64 {
    // the epoch fell on a Thursday
    floor_mod(floor_div(instant, MILLIS_PER_DAY) + 3, 7) + 1
}

/// Moves an instant to another year, keeping the month, day, and time of
/// day; the 29th of February falls back to the 28th when the target year
/// is not a leap year.
pub fn set_year(instant: i64, year: i64) -> Result<i64> {
    let (old_year, month, day) = ymd_of(instant);
    if year == old_year {
        return Ok(instant);
    }
    let millis = floor_mod(instant, MILLIS_PER_DAY);
    let day = day.min(days_in_year_month(year, month));
    safe_add(ymd_millis(year, month, day)?, millis)
}

/// Adds a number of calendar months, clamping the day of month into the
/// target month.
pub fn add_months(instant: i64, months: i64) -> Result<i64> {
    if months == 0 {
        return Ok(instant);
    }
    let (year, month, day) = ymd_of(instant);
    let millis = floor_mod(instant, MILLIS_PER_DAY);

    let total = safe_add(safe_multiply(year, 12)?, safe_add(month - 1, months)?)?;
    let new_year = floor_div(total, 12);
    verify_value_bounds("year", new_year, MIN_YEAR, MAX_YEAR)?;
    let new_month = floor_mod(total, 12) + 1;
    let new_day = day.min(days_in_year_month(new_year, new_month));

    safe_add(ymd_millis(new_year, new_month, new_day)?, millis)
}

/// The signed count of whole months between two local instants: the
/// year-and-month difference, reduced by one when the minuend sits
/// earlier within its month than the subtrahend does within its own.
/// The inverse of [`add_months`]: a minuend on the last day of its
/// month counts a larger subtrahend day as clamped down to it.
pub fn months_between(minuend: i64, subtrahend: i64) -> Result<i64> {
    if minuend < subtrahend {
        return safe_negate(months_between(subtrahend, minuend)?);
    }

    let (min_year, min_month, min_day) = ymd_of(minuend);
    let (sub_year, sub_month, sub_day) = ymd_of(subtrahend);
    let difference = (min_year * 12 + min_month) - (sub_year * 12 + sub_month);

    let mut subtrahend = subtrahend;
    if min_day == days_in_year_month(min_year, min_month) && sub_day > min_day {
        subtrahend -= (sub_day - min_day) * MILLIS_PER_DAY;
    }

    let min_rem = minuend - ymd_millis(min_year, min_month, 1)?;
    let sub_rem = subtrahend - ymd_millis(sub_year, sub_month, 1)?;
    Ok(if min_rem < sub_rem { difference - 1 } else { difference })
}

/// The signed count of whole years between two local instants, with the
/// within-year remainders balanced across the 29th of February so that a
/// leap day neither gains nor costs a year.
pub fn years_between(minuend: i64, subtrahend: i64) -> Result<i64> {
    if minuend < subtrahend {
        return safe_negate(years_between(subtrahend, minuend)?);
    }

    let min_year = year_of(minuend);
    let sub_year = year_of(subtrahend);
    let mut min_rem = minuend - year_start_millis(min_year)?;
    let mut sub_rem = subtrahend - year_start_millis(sub_year)?;

    if sub_rem >= FEB_29_MILLIS {
        if is_leap_year(sub_year) {
            if !is_leap_year(min_year) {
                sub_rem -= MILLIS_PER_DAY;
            }
        }
        else if min_rem >= FEB_29_MILLIS && is_leap_year(min_year) {
            min_rem -= MILLIS_PER_DAY;
        }
    }

    let difference = min_year - sub_year;
    Ok(if min_rem < sub_rem { difference - 1 } else { difference })
}

/// The day number of the Monday starting week 1 of the given weekyear:
/// the week holding the first Thursday of January.
fn first_week_day(year: i64) -> i64 {
    let jan1 = days_before_year(year);
    let dow = floor_mod(jan1 + 3, 7) + 1;
    if dow > 4 {
        // the first few days of January belong to the old weekyear
        jan1 + (8 - dow)
    }
    else {
        jan1 - (dow - 1)
    }
}

/// The number of ISO weeks in the given weekyear, 52 or 53.
pub fn weeks_in_year(year: i64) -> i64 {
    (first_week_day(year + 1) - first_week_day(year)) / 7
}

/// The weekyear a local instant belongs to, which near New Year may
/// differ from the calendar year.
pub fn weekyear_of(instant: i64) -> i64 {
    let year = year_of(instant);
    let day = floor_div(instant, MILLIS_PER_DAY);
    if day < first_week_day(year) {
        year - 1
    }
    else if day >= first_week_day(year + 1) {
        year + 1
    }
    else {
        year
    }
}

/// The one-based week of weekyear of a local instant.
pub fn week_of_weekyear(instant: i64) -> i64 {
    let day = floor_div(instant, MILLIS_PER_DAY);
    (day - first_week_day(weekyear_of(instant))) / 7 + 1
}

/// Moves an instant to another weekyear, keeping the week of weekyear
/// (clamped into the shorter year where necessary) and the day of week.
pub fn set_weekyear(instant: i64, year: i64) -> Result<i64> {
    verify_value_bounds("weekyear", year, MIN_YEAR, MAX_YEAR)?;
    let from_year = weekyear_of(instant);
    if from_year == year {
        return Ok(instant);
    }

    let dow = day_of_week(instant);
    let max_weeks = weeks_in_year(from_year).min(weeks_in_year(year));
    let target_week = week_of_weekyear(instant).min(max_weeks);

    let mut work = set_year(instant, year)?;
    // setting the calendar year may leave us in a neighbouring weekyear
    let work_weekyear = weekyear_of(work);
    if work_weekyear < year {
        work = safe_add(work, MILLIS_PER_WEEK)?;
    }
    else if work_weekyear > year {
        work = safe_subtract(work, MILLIS_PER_WEEK)?;
    }

    let shift = safe_subtract(target_week, week_of_weekyear(work))?;
    work = safe_add(work, safe_multiply(shift, MILLIS_PER_WEEK)?)?;
    safe_add(work, safe_multiply(safe_subtract(dow, day_of_week(work))?, MILLIS_PER_DAY)?)
}


/// Builds the Gregorian field table, the base layer under every
/// chronology here.
pub(crate) fn assemble() -> FieldTable {
    let millis: Arc<dyn DurationField> = Arc::new(PreciseDurationField::new(D::Millis, 1));
    let seconds: Arc<dyn DurationField> = Arc::new(PreciseDurationField::new(D::Seconds, MILLIS_PER_SECOND));
    let minutes: Arc<dyn DurationField> = Arc::new(PreciseDurationField::new(D::Minutes, MILLIS_PER_MINUTE));
    let hours: Arc<dyn DurationField> = Arc::new(PreciseDurationField::new(D::Hours, MILLIS_PER_HOUR));
    let halfdays: Arc<dyn DurationField> = Arc::new(PreciseDurationField::new(D::Halfdays, 12 * MILLIS_PER_HOUR));
    let days: Arc<dyn DurationField> = Arc::new(PreciseDurationField::new(D::Days, MILLIS_PER_DAY));
    let weeks: Arc<dyn DurationField> = Arc::new(PreciseDurationField::new(D::Weeks, MILLIS_PER_WEEK));
    let years: Arc<dyn DurationField> = Arc::new(YearsDurationField);
    let months: Arc<dyn DurationField> = Arc::new(MonthsDurationField);
    let weekyears: Arc<dyn DurationField> = Arc::new(WeekyearsDurationField);
    let centuries: Arc<dyn DurationField> = Arc::new(ScaledDurationField::new(years.clone(), D::Centuries, 100));
    let eras: Arc<dyn DurationField> = Arc::new(UnsupportedDurationField::new(D::Eras));

    let millis_of_second: Arc<dyn DateTimeField> = Arc::new(PreciseDateTimeField::new(T::MillisOfSecond, millis.clone(), seconds.clone()));
    let millis_of_day: Arc<dyn DateTimeField> = Arc::new(PreciseDateTimeField::new(T::MillisOfDay, millis.clone(), days.clone()));
    let second_of_minute: Arc<dyn DateTimeField> = Arc::new(PreciseDateTimeField::new(T::SecondOfMinute, seconds.clone(), minutes.clone()));
    let second_of_day: Arc<dyn DateTimeField> = Arc::new(PreciseDateTimeField::new(T::SecondOfDay, seconds.clone(), days.clone()));
    let minute_of_hour: Arc<dyn DateTimeField> = Arc::new(PreciseDateTimeField::new(T::MinuteOfHour, minutes.clone(), hours.clone()));
    let minute_of_day: Arc<dyn DateTimeField> = Arc::new(PreciseDateTimeField::new(T::MinuteOfDay, minutes.clone(), days.clone()));
    let hour_of_day: Arc<dyn DateTimeField> = Arc::new(PreciseDateTimeField::new(T::HourOfDay, hours.clone(), days.clone()));
    let hour_of_halfday: Arc<dyn DateTimeField> = Arc::new(PreciseDateTimeField::new(T::HourOfHalfday, hours.clone(), halfdays.clone()));
    let halfday_of_day: Arc<dyn DateTimeField> = Arc::new(PreciseDateTimeField::new(T::HalfdayOfDay, halfdays.clone(), days.clone()));
    let clockhour_of_day: Arc<dyn DateTimeField> = Arc::new(ZeroIsMaxField::new(hour_of_day.clone(), T::ClockhourOfDay));
    let clockhour_of_halfday: Arc<dyn DateTimeField> = Arc::new(ZeroIsMaxField::new(hour_of_halfday.clone(), T::ClockhourOfHalfday));

    let year: Arc<dyn DateTimeField> = Arc::new(YearField::new(years.clone()));
    let year_of_era: Arc<dyn DateTimeField> = Arc::new(YearOfEraField::new(years.clone(), eras.clone()));
    let era: Arc<dyn DateTimeField> = Arc::new(EraField::new(eras.clone()));
    let month_of_year: Arc<dyn DateTimeField> = Arc::new(MonthOfYearField::new(months.clone(), years.clone()));
    let day_of_month: Arc<dyn DateTimeField> = Arc::new(DayOfMonthField::new(days.clone(), months.clone()));
    let day_of_year: Arc<dyn DateTimeField> = Arc::new(DayOfYearField::new(days.clone(), years.clone()));
    let day_of_week: Arc<dyn DateTimeField> = Arc::new(DayOfWeekField::new(days.clone(), weeks.clone()));
    let weekyear: Arc<dyn DateTimeField> = Arc::new(WeekyearField::new(weekyears.clone()));
    let week_of_weekyear: Arc<dyn DateTimeField> = Arc::new(WeekOfWeekyearField::new(weeks.clone(), weekyears.clone()));

    let century_of_era: Arc<dyn DateTimeField> =
        Arc::new(DividedDateTimeField::new(year_of_era.clone(), T::CenturyOfEra, 100,
                                           centuries.clone(), Some(eras.clone())));
    let year_of_century: Arc<dyn DateTimeField> =
        Arc::new(RemainderDateTimeField::new(year_of_era.clone(), T::YearOfCentury, 100, centuries.clone()));
    let weekyear_of_century: Arc<dyn DateTimeField> =
        Arc::new(RemainderDateTimeField::new(weekyear.clone(), T::WeekyearOfCentury, 100, centuries.clone()));

    FieldTable {
        eras, centuries, weekyears, years, months, weeks,
        days, halfdays, hours, minutes, seconds, millis,

        era, century_of_era, year_of_era, year_of_century, year,
        day_of_year, month_of_year, day_of_month,
        weekyear_of_century, weekyear, week_of_weekyear, day_of_week,
        halfday_of_day, hour_of_halfday, clockhour_of_halfday, clockhour_of_day, hour_of_day,
        minute_of_day, minute_of_hour, second_of_day, second_of_minute,
        millis_of_day, millis_of_second,
    }
}

lazy_static! {
    static ref INSTANCE_UTC: Chronology = Chronology::assemble(ChronologyKind::Gregorian, DateTimeZone::utc());

    static ref INSTANCES: Mutex<HashMap<DateTimeZone, Chronology>> = Mutex::new(HashMap::new());
}

/// The Gregorian chronology in UTC.
pub fn instance_utc() -> Chronology {
    INSTANCE_UTC.clone()
}

/// The Gregorian chronology in the given zone, cached per zone.
pub fn instance(zone: DateTimeZone) -> Chronology {
    if zone == DateTimeZone::utc() {
        return instance_utc();
    }
    let mut cache = INSTANCES.lock().unwrap_or_else(|e| e.into_inner());
    cache.entry(zone.clone())
         .or_insert_with(|| {
             trace!(zone = zone.id(), "assembling Gregorian chronology");
             Chronology::assemble(ChronologyKind::Gregorian, zone)
         })
         .clone()
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn leap_years() {
        assert!(is_leap_year(2000));
        assert!(is_leap_year(1996));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2014));
        assert!(is_leap_year(0));
    }

    #[test]
    fn known_dates() {
        assert_eq!(days_from_ymd(1970, 1, 1), 0);
        assert_eq!(days_from_ymd(2000, 3, 1), EPOCH_SHIFT_DAYS);
        assert_eq!(ymd_from_days(0), (1970, 1, 1));
        assert_eq!(ymd_from_days(-1), (1969, 12, 31));
        assert_eq!(ymd_from_days(days_from_ymd(2400, 2, 29)), (2400, 2, 29));
    }

    #[test]
    fn dates_round_trip() {
        for days in (-1_000_000..1_000_000).step_by(1_789) {
            let (year, month, day) = ymd_from_days(days);
            assert!(month >= 1 && month <= 12);
            assert!(day >= 1 && day <= days_in_year_month(year, month));
            assert_eq!(days_from_ymd(year, month, day), days, "date {:?}", (year, month, day));
        }
    }

    #[test]
    fn days_of_week() {
        // the epoch was a Thursday, the day before a Wednesday
        assert_eq!(day_of_week(0), 4);
        assert_eq!(day_of_week(-1), 3);
        assert_eq!(day_of_week(ymd_millis(2008, 12, 29).unwrap()), 1);
    }

    #[test]
    fn year_setting_clamps_leap_day() {
        let leap_day = ymd_millis(2012, 2, 29).unwrap() + 7 * MILLIS_PER_HOUR;
        let moved = set_year(leap_day, 2013).unwrap();
        assert_eq!(ymd_of(moved), (2013, 2, 28));
        assert_eq!(floor_mod(moved, MILLIS_PER_DAY), 7 * MILLIS_PER_HOUR);
    }

    #[test]
    fn month_addition_clamps() {
        let jan31 = ymd_millis(2007, 1, 31).unwrap();
        assert_eq!(ymd_of(add_months(jan31, 1).unwrap()), (2007, 2, 28));
        assert_eq!(ymd_of(add_months(jan31, 3).unwrap()), (2007, 4, 30));
        assert_eq!(ymd_of(add_months(jan31, -13).unwrap()), (2005, 12, 31));
    }

    #[test]
    fn month_differences() {
        let a = ymd_millis(2007, 1, 31).unwrap();
        let b = ymd_millis(2007, 2, 28).unwrap();
        // the 28th of February closes its month, so it counts as a whole
        // month past the 31st of January, matching what add_months gives
        assert_eq!(add_months(a, 1), Ok(b));
        assert_eq!(months_between(b, a), Ok(1));
        assert_eq!(months_between(a, b), Ok(-1));
        assert_eq!(months_between(ymd_millis(2007, 3, 1).unwrap(), a), Ok(1));

        // mid-month minuends still compare plain remainders
        let mid = ymd_millis(2007, 2, 14).unwrap();
        assert_eq!(months_between(mid, a), Ok(0));
    }

    #[test]
    fn year_differences_balance_leap_days() {
        let feb29 = ymd_millis(2012, 2, 29).unwrap();
        let feb28 = ymd_millis(2013, 2, 28).unwrap();
        assert_eq!(years_between(feb28, feb29), Ok(1));
        let mar1 = ymd_millis(2011, 3, 1).unwrap();
        assert_eq!(years_between(feb29, mar1), Ok(0));
    }

    #[test]
    fn iso_week_numbering() {
        // the 29th of December 2008 opens week 1 of weekyear 2009
        let dec29 = ymd_millis(2008, 12, 29).unwrap();
        assert_eq!(weekyear_of(dec29), 2009);
        assert_eq!(week_of_weekyear(dec29), 1);

        // the 3rd of January 2010 closes week 53 of weekyear 2009
        let jan3 = ymd_millis(2010, 1, 3).unwrap();
        assert_eq!(weekyear_of(jan3), 2009);
        assert_eq!(week_of_weekyear(jan3), 53);

        assert_eq!(weeks_in_year(2009), 53);
        assert_eq!(weeks_in_year(2010), 52);
    }

    #[test]
    fn weekyear_setting_keeps_week_and_day() {
        let dec29 = ymd_millis(2008, 12, 29).unwrap();
        let moved = set_weekyear(dec29, 2010).unwrap();
        assert_eq!(weekyear_of(moved), 2010);
        assert_eq!(week_of_weekyear(moved), 1);
        assert_eq!(day_of_week(moved), 1);
    }
}
