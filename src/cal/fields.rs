//! Field implementations for the calendar components whose lengths vary:
//! years, months, weeks, and their derivatives. The fixed-length
//! time-of-day fields come straight from the field layer instead.

use std::sync::Arc;

use crate::arith::{safe_add, safe_subtract, safe_multiply, safe_negate, floor_mod, verify_value_bounds};
use crate::cal::gregorian::{self, MIN_YEAR, MAX_YEAR};
use crate::error::{Error, Result};
use crate::field::{DateTimeField, DateTimeFieldType, DurationField, DurationFieldType};
use crate::{MILLIS_PER_DAY, MILLIS_PER_WEEK};


/// The average length of a Gregorian year over the 400-year cycle.
const AVERAGE_YEAR_MILLIS: i64 = 31_556_952_000;

/// The average length of a Gregorian month over the 400-year cycle.
const AVERAGE_MONTH_MILLIS: i64 = 2_629_746_000;

fn day_start(instant: i64) -> Result<i64> {
    safe_subtract(instant, floor_mod(instant, MILLIS_PER_DAY))
}

fn week_start(instant: i64) -> Result<i64> {
    let shift = safe_multiply(gregorian::day_of_week(instant) - 1, MILLIS_PER_DAY)?;
    safe_subtract(day_start(instant)?, shift)
}


/// Calendar years as a unit of elapsed time. Imprecise: adding a year
/// lands on the same date a year on, clamping a leap day.
#[derive(Debug)]
pub(crate) struct YearsDurationField;

impl DurationField for YearsDurationField {
    fn duration_type(&self) -> DurationFieldType {
        DurationFieldType::Years
    }

    fn is_precise(&self) -> bool {
        false
    }

    fn unit_millis(&self) -> i64 {
        AVERAGE_YEAR_MILLIS
    }

    fn value(&self, duration: i64, instant: i64) -> Result<i64> {
        self.difference(safe_add(instant, duration)?, instant)
    }

    fn millis_of(&self, value: i64, instant: i64) -> Result<i64> {
        safe_subtract(self.add(instant, value)?, instant)
    }

    fn add(&self, instant: i64, value: i64) -> Result<i64> {
        let year = safe_add(gregorian::year_of(instant), value)?;
        verify_value_bounds("year", year, MIN_YEAR, MAX_YEAR)?;
        gregorian::set_year(instant, year)
    }

    fn difference(&self, minuend: i64, subtrahend: i64) -> Result<i64> {
        gregorian::years_between(minuend, subtrahend)
    }
}


/// Calendar months as a unit of elapsed time.
#[derive(Debug)]
pub(crate) struct MonthsDurationField;

impl DurationField for MonthsDurationField {
    fn duration_type(&self) -> DurationFieldType {
        DurationFieldType::Months
    }

    fn is_precise(&self) -> bool {
        false
    }

    fn unit_millis(&self) -> i64 {
        AVERAGE_MONTH_MILLIS
    }

    fn value(&self, duration: i64, instant: i64) -> Result<i64> {
        self.difference(safe_add(instant, duration)?, instant)
    }

    fn millis_of(&self, value: i64, instant: i64) -> Result<i64> {
        safe_subtract(self.add(instant, value)?, instant)
    }

    fn add(&self, instant: i64, value: i64) -> Result<i64> {
        gregorian::add_months(instant, value)
    }

    fn difference(&self, minuend: i64, subtrahend: i64) -> Result<i64> {
        gregorian::months_between(minuend, subtrahend)
    }
}


/// Weekyears as a unit of elapsed time. The difference is found by
/// estimating from the average length and correcting against the
/// calendar.
#[derive(Debug)]
pub(crate) struct WeekyearsDurationField;

impl DurationField for WeekyearsDurationField {
    fn duration_type(&self) -> DurationFieldType {
        DurationFieldType::Weekyears
    }

    fn is_precise(&self) -> bool {
        false
    }

    fn unit_millis(&self) -> i64 {
        AVERAGE_YEAR_MILLIS
    }

    fn value(&self, duration: i64, instant: i64) -> Result<i64> {
        self.difference(safe_add(instant, duration)?, instant)
    }

    fn millis_of(&self, value: i64, instant: i64) -> Result<i64> {
        safe_subtract(self.add(instant, value)?, instant)
    }

    fn add(&self, instant: i64, value: i64) -> Result<i64> {
        let year = safe_add(gregorian::weekyear_of(instant), value)?;
        gregorian::set_weekyear(instant, year)
    }

    fn difference(&self, minuend: i64, subtrahend: i64) -> Result<i64> {
        if minuend < subtrahend {
            return safe_negate(self.difference(subtrahend, minuend)?);
        }

        let mut difference = safe_subtract(minuend, subtrahend)? / self.unit_millis();
        if self.add(subtrahend, difference)? < minuend {
            loop {
                difference += 1;
                if self.add(subtrahend, difference)? > minuend {
                    break;
                }
            }
            difference -= 1;
        }
        else {
            while self.add(subtrahend, difference)? > minuend {
                difference -= 1;
            }
        }
        Ok(difference)
    }
}


/// The signed proleptic year, where year 0 exists and precedes year 1.
#[derive(Debug)]
pub(crate) struct YearField {
    years: Arc<dyn DurationField>,
}

impl YearField {
    pub fn new(years: Arc<dyn DurationField>) -> Self {
        Self { years }
    }
}

impl DateTimeField for YearField {
    fn field_type(&self) -> DateTimeFieldType {
        DateTimeFieldType::Year
    }

    fn get(&self, instant: i64) -> i64 {
        gregorian::year_of(instant)
    }

    fn set(&self, instant: i64, value: i64) -> Result<i64> {
        verify_value_bounds("year", value, MIN_YEAR, MAX_YEAR)?;
        gregorian::set_year(instant, value)
    }

    fn add(&self, instant: i64, amount: i64) -> Result<i64> {
        self.years.add(instant, amount)
    }

    fn duration_field(&self) -> Arc<dyn DurationField> {
        self.years.clone()
    }

    fn range_duration_field(&self) -> Option<Arc<dyn DurationField>> {
        None
    }

    fn minimum_value(&self) -> i64 {
        MIN_YEAR
    }

    fn maximum_value(&self) -> i64 {
        MAX_YEAR
    }

    fn round_floor(&self, instant: i64) -> Result<i64> {
        gregorian::year_start_millis(gregorian::year_of(instant))
    }
}


/// The year within its era, always positive: year 0 reads as year 1 BCE
/// and year -1 as year 2 BCE.
#[derive(Debug)]
pub(crate) struct YearOfEraField {
    years: Arc<dyn DurationField>,
    eras: Arc<dyn DurationField>,
}

impl YearOfEraField {
    pub fn new(years: Arc<dyn DurationField>, eras: Arc<dyn DurationField>) -> Self {
        Self { years, eras }
    }
}

impl DateTimeField for YearOfEraField {
    fn field_type(&self) -> DateTimeFieldType {
        DateTimeFieldType::YearOfEra
    }

    fn get(&self, instant: i64) -> i64 {
        let year = gregorian::year_of(instant);
        if year <= 0 { 1 - year } else { year }
    }

    fn set(&self, instant: i64, value: i64) -> Result<i64> {
        verify_value_bounds("yearOfEra", value, 1, MAX_YEAR)?;
        if gregorian::year_of(instant) <= 0 {
            gregorian::set_year(instant, 1 - value)
        }
        else {
            gregorian::set_year(instant, value)
        }
    }

    fn add(&self, instant: i64, amount: i64) -> Result<i64> {
        self.years.add(instant, amount)
    }

    fn duration_field(&self) -> Arc<dyn DurationField> {
        self.years.clone()
    }

    fn range_duration_field(&self) -> Option<Arc<dyn DurationField>> {
        Some(self.eras.clone())
    }

    fn minimum_value(&self) -> i64 {
        1
    }

    fn maximum_value(&self) -> i64 {
        MAX_YEAR
    }

    fn round_floor(&self, instant: i64) -> Result<i64> {
        gregorian::year_start_millis(gregorian::year_of(instant))
    }
}


/// Era constant for before the common era.
pub const BCE: i64 = 0;

/// Era constant for the common era.
pub const CE: i64 = 1;

/// The era: 0 before year 1, 1 from year 1 onward. Flipping the era maps
/// a year to its mirror across the era boundary.
#[derive(Debug)]
pub(crate) struct EraField {
    eras: Arc<dyn DurationField>,
}

impl EraField {
    pub fn new(eras: Arc<dyn DurationField>) -> Self {
        Self { eras }
    }
}

impl DateTimeField for EraField {
    fn field_type(&self) -> DateTimeFieldType {
        DateTimeFieldType::Era
    }

    fn get(&self, instant: i64) -> i64 {
        if gregorian::year_of(instant) <= 0 { BCE } else { CE }
    }

    fn set(&self, instant: i64, value: i64) -> Result<i64> {
        verify_value_bounds("era", value, BCE, CE)?;
        if value == self.get(instant) {
            Ok(instant)
        }
        else {
            gregorian::set_year(instant, 1 - gregorian::year_of(instant))
        }
    }

    fn add(&self, _instant: i64, _amount: i64) -> Result<i64> {
        Err(Error::UnsupportedField("eras"))
    }

    fn add_wrap_field(&self, _instant: i64, _amount: i64) -> Result<i64> {
        Err(Error::UnsupportedField("eras"))
    }

    fn duration_field(&self) -> Arc<dyn DurationField> {
        self.eras.clone()
    }

    fn range_duration_field(&self) -> Option<Arc<dyn DurationField>> {
        None
    }

    fn minimum_value(&self) -> i64 {
        BCE
    }

    fn maximum_value(&self) -> i64 {
        CE
    }

    fn round_floor(&self, instant: i64) -> Result<i64> {
        if self.get(instant) == CE {
            gregorian::year_start_millis(1)
        }
        else {
            Ok(i64::MIN)
        }
    }
}


/// The month of year, 1 to 12. Setting or adding clamps the day of month
/// into the target month; setting never changes the year.
#[derive(Debug)]
pub(crate) struct MonthOfYearField {
    months: Arc<dyn DurationField>,
    years: Arc<dyn DurationField>,
}

impl MonthOfYearField {
    pub fn new(months: Arc<dyn DurationField>, years: Arc<dyn DurationField>) -> Self {
        Self { months, years }
    }
}

impl DateTimeField for MonthOfYearField {
    fn field_type(&self) -> DateTimeFieldType {
        DateTimeFieldType::MonthOfYear
    }

    fn get(&self, instant: i64) -> i64 {
        gregorian::ymd_of(instant).1
    }

    fn set(&self, instant: i64, value: i64) -> Result<i64> {
        verify_value_bounds("monthOfYear", value, 1, 12)?;
        let (year, _, day) = gregorian::ymd_of(instant);
        let millis = floor_mod(instant, MILLIS_PER_DAY);
        let day = day.min(gregorian::days_in_year_month(year, value));
        safe_add(gregorian::ymd_millis(year, value, day)?, millis)
    }

    fn add(&self, instant: i64, amount: i64) -> Result<i64> {
        gregorian::add_months(instant, amount)
    }

    fn duration_field(&self) -> Arc<dyn DurationField> {
        self.months.clone()
    }

    fn range_duration_field(&self) -> Option<Arc<dyn DurationField>> {
        Some(self.years.clone())
    }

    fn minimum_value(&self) -> i64 {
        1
    }

    fn maximum_value(&self) -> i64 {
        12
    }

    fn round_floor(&self, instant: i64) -> Result<i64> {
        let (year, month, _) = gregorian::ymd_of(instant);
        gregorian::ymd_millis(year, month, 1)
    }
}


/// The day of month, 1 to 28, 29, 30, or 31 depending on the month.
#[derive(Debug)]
pub(crate) struct DayOfMonthField {
    days: Arc<dyn DurationField>,
    months: Arc<dyn DurationField>,
}

impl DayOfMonthField {
    pub fn new(days: Arc<dyn DurationField>, months: Arc<dyn DurationField>) -> Self {
        Self { days, months }
    }
}

impl DateTimeField for DayOfMonthField {
    fn field_type(&self) -> DateTimeFieldType {
        DateTimeFieldType::DayOfMonth
    }

    fn get(&self, instant: i64) -> i64 {
        gregorian::ymd_of(instant).2
    }

    fn set(&self, instant: i64, value: i64) -> Result<i64> {
        verify_value_bounds("dayOfMonth", value, 1, self.maximum_value_at(instant))?;
        let shift = safe_multiply(safe_subtract(value, self.get(instant))?, MILLIS_PER_DAY)?;
        safe_add(instant, shift)
    }

    fn add(&self, instant: i64, amount: i64) -> Result<i64> {
        self.days.add(instant, amount)
    }

    fn duration_field(&self) -> Arc<dyn DurationField> {
        self.days.clone()
    }

    fn range_duration_field(&self) -> Option<Arc<dyn DurationField>> {
        Some(self.months.clone())
    }

    fn minimum_value(&self) -> i64 {
        1
    }

    fn maximum_value(&self) -> i64 {
        31
    }

    fn maximum_value_at(&self, instant: i64) -> i64 {
        let (year, month, _) = gregorian::ymd_of(instant);
        gregorian::days_in_year_month(year, month)
    }

    fn round_floor(&self, instant: i64) -> Result<i64> {
        day_start(instant)
    }
}


/// The day of year, 1 to 365 or 366.
#[derive(Debug)]
pub(crate) struct DayOfYearField {
    days: Arc<dyn DurationField>,
    years: Arc<dyn DurationField>,
}

impl DayOfYearField {
    pub fn new(days: Arc<dyn DurationField>, years: Arc<dyn DurationField>) -> Self {
        Self { days, years }
    }
}

impl DateTimeField for DayOfYearField {
    fn field_type(&self) -> DateTimeFieldType {
        DateTimeFieldType::DayOfYear
    }

    fn get(&self, instant: i64) -> i64 {
        gregorian::day_of_year_of(instant)
    }

    fn set(&self, instant: i64, value: i64) -> Result<i64> {
        verify_value_bounds("dayOfYear", value, 1, self.maximum_value_at(instant))?;
        let shift = safe_multiply(safe_subtract(value, self.get(instant))?, MILLIS_PER_DAY)?;
        safe_add(instant, shift)
    }

    fn add(&self, instant: i64, amount: i64) -> Result<i64> {
        self.days.add(instant, amount)
    }

    fn duration_field(&self) -> Arc<dyn DurationField> {
        self.days.clone()
    }

    fn range_duration_field(&self) -> Option<Arc<dyn DurationField>> {
        Some(self.years.clone())
    }

    fn minimum_value(&self) -> i64 {
        1
    }

    fn maximum_value(&self) -> i64 {
        366
    }

    fn maximum_value_at(&self, instant: i64) -> i64 {
        gregorian::days_in_year(gregorian::year_of(instant))
    }

    fn round_floor(&self, instant: i64) -> Result<i64> {
        day_start(instant)
    }
}


/// The ISO day of week, Monday 1 through Sunday 7.
#[derive(Debug)]
pub(crate) struct DayOfWeekField {
    days: Arc<dyn DurationField>,
    weeks: Arc<dyn DurationField>,
}

impl DayOfWeekField {
    pub fn new(days: Arc<dyn DurationField>, weeks: Arc<dyn DurationField>) -> Self {
        Self { days, weeks }
    }
}

impl DateTimeField for DayOfWeekField {
    fn field_type(&self) -> DateTimeFieldType {
        DateTimeFieldType::DayOfWeek
    }

    fn get(&self, instant: i64) -> i64 {
        gregorian::day_of_week(instant)
    }

    fn set(&self, instant: i64, value: i64) -> Result<i64> {
        verify_value_bounds("dayOfWeek", value, 1, 7)?;
        let shift = safe_multiply(safe_subtract(value, self.get(instant))?, MILLIS_PER_DAY)?;
        safe_add(instant, shift)
    }

    fn add(&self, instant: i64, amount: i64) -> Result<i64> {
        self.days.add(instant, amount)
    }

    fn duration_field(&self) -> Arc<dyn DurationField> {
        self.days.clone()
    }

    fn range_duration_field(&self) -> Option<Arc<dyn DurationField>> {
        Some(self.weeks.clone())
    }

    fn minimum_value(&self) -> i64 {
        1
    }

    fn maximum_value(&self) -> i64 {
        7
    }

    fn round_floor(&self, instant: i64) -> Result<i64> {
        day_start(instant)
    }
}


/// The week of weekyear, 1 to 52 or 53.
#[derive(Debug)]
pub(crate) struct WeekOfWeekyearField {
    weeks: Arc<dyn DurationField>,
    weekyears: Arc<dyn DurationField>,
}

impl WeekOfWeekyearField {
    pub fn new(weeks: Arc<dyn DurationField>, weekyears: Arc<dyn DurationField>) -> Self {
        Self { weeks, weekyears }
    }
}

impl DateTimeField for WeekOfWeekyearField {
    fn field_type(&self) -> DateTimeFieldType {
        DateTimeFieldType::WeekOfWeekyear
    }

    fn get(&self, instant: i64) -> i64 {
        gregorian::week_of_weekyear(instant)
    }

    fn set(&self, instant: i64, value: i64) -> Result<i64> {
        verify_value_bounds("weekOfWeekyear", value, 1, self.maximum_value_at(instant))?;
        let shift = safe_multiply(safe_subtract(value, self.get(instant))?, MILLIS_PER_WEEK)?;
        safe_add(instant, shift)
    }

    fn add(&self, instant: i64, amount: i64) -> Result<i64> {
        self.weeks.add(instant, amount)
    }

    fn duration_field(&self) -> Arc<dyn DurationField> {
        self.weeks.clone()
    }

    fn range_duration_field(&self) -> Option<Arc<dyn DurationField>> {
        Some(self.weekyears.clone())
    }

    fn minimum_value(&self) -> i64 {
        1
    }

    fn maximum_value(&self) -> i64 {
        53
    }

    fn maximum_value_at(&self, instant: i64) -> i64 {
        gregorian::weeks_in_year(gregorian::weekyear_of(instant))
    }

    fn round_floor(&self, instant: i64) -> Result<i64> {
        week_start(instant)
    }
}


/// The weekyear: the year of the ISO week-numbering calendar.
#[derive(Debug)]
pub(crate) struct WeekyearField {
    weekyears: Arc<dyn DurationField>,
}

impl WeekyearField {
    pub fn new(weekyears: Arc<dyn DurationField>) -> Self {
        Self { weekyears }
    }
}

impl DateTimeField for WeekyearField {
    fn field_type(&self) -> DateTimeFieldType {
        DateTimeFieldType::Weekyear
    }

    fn get(&self, instant: i64) -> i64 {
        gregorian::weekyear_of(instant)
    }

    fn set(&self, instant: i64, value: i64) -> Result<i64> {
        gregorian::set_weekyear(instant, value)
    }

    fn add(&self, instant: i64, amount: i64) -> Result<i64> {
        self.weekyears.add(instant, amount)
    }

    fn duration_field(&self) -> Arc<dyn DurationField> {
        self.weekyears.clone()
    }

    fn range_duration_field(&self) -> Option<Arc<dyn DurationField>> {
        None
    }

    fn minimum_value(&self) -> i64 {
        MIN_YEAR
    }

    fn maximum_value(&self) -> i64 {
        MAX_YEAR
    }

    fn round_floor(&self, instant: i64) -> Result<i64> {
        // back up to the Monday opening week 1
        let week = gregorian::week_of_weekyear(instant);
        let start = week_start(instant)?;
        safe_subtract(start, safe_multiply(week - 1, MILLIS_PER_WEEK)?)
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::cal::iso;

    fn instant_at(year: i64, month: i64, day: i64) -> i64 {
        gregorian::ymd_millis(year, month, day).unwrap()
    }

    #[test]
    fn era_flip_mirrors_years() {
        let chrono = iso::instance_utc();
        let bce = chrono.year().set(0, -3).unwrap();
        assert_eq!(chrono.era().get(bce), BCE);
        assert_eq!(chrono.year_of_era().get(bce), 4);

        let flipped = chrono.era().set(bce, CE).unwrap();
        assert_eq!(chrono.year().get(flipped), 4);
        assert_eq!(chrono.year_of_era().get(flipped), 4);
    }

    #[test]
    fn era_addition_is_unsupported() {
        let chrono = iso::instance_utc();
        assert!(chrono.era().add(0, 1).is_err());
        assert!(!chrono.eras().is_supported());
    }

    #[test]
    fn day_of_month_respects_month_length() {
        let chrono = iso::instance_utc();
        let feb = instant_at(2007, 2, 10);
        assert_eq!(chrono.day_of_month().maximum_value_at(feb), 28);
        assert!(chrono.day_of_month().set(feb, 30).is_err());
        assert_eq!(chrono.day_of_month().set(feb, 28), Ok(instant_at(2007, 2, 28)));
    }

    #[test]
    fn month_set_clamps_day() {
        let chrono = iso::instance_utc();
        let jan31 = instant_at(2007, 1, 31);
        let feb = chrono.month_of_year().set(jan31, 2).unwrap();
        assert_eq!(gregorian::ymd_of(feb), (2007, 2, 28));
    }

    #[test]
    fn month_add_wrap_field_stays_in_year() {
        let chrono = iso::instance_utc();
        let nov = instant_at(2007, 11, 15);
        let wrapped = chrono.month_of_year().add_wrap_field(nov, 2).unwrap();
        assert_eq!(gregorian::ymd_of(wrapped), (2007, 1, 15));
    }

    #[test]
    fn year_round_floor() {
        let chrono = iso::instance_utc();
        let midyear = instant_at(2014, 7, 20) + 12_345;
        assert_eq!(chrono.year().round_floor(midyear), Ok(instant_at(2014, 1, 1)));
        assert_eq!(chrono.year().round_ceiling(midyear), Ok(instant_at(2015, 1, 1)));
    }

    #[test]
    fn weekyear_round_floor() {
        let chrono = iso::instance_utc();
        // week 1 of weekyear 2009 opens on the 29th of December 2008
        let midfeb = instant_at(2009, 2, 14);
        assert_eq!(chrono.weekyear().round_floor(midfeb), Ok(instant_at(2008, 12, 29)));
    }

    #[test]
    fn weekyear_duration_difference() {
        let field = WeekyearsDurationField;
        let start = instant_at(2008, 12, 29);
        // the 3rd of January 2010 still belongs to weekyear 2009; the
        // 4th opens weekyear 2010
        let end = instant_at(2010, 1, 4);
        assert_eq!(field.difference(instant_at(2010, 1, 3), start), Ok(0));
        assert_eq!(field.difference(end, start), Ok(1));
        assert_eq!(field.difference(start, end), Ok(-1));
    }

    #[test]
    fn day_of_week_set() {
        let chrono = iso::instance_utc();
        let saturday = instant_at(2001, 2, 3);
        let monday = chrono.day_of_week().set(saturday, 1).unwrap();
        assert_eq!(gregorian::ymd_of(monday), (2001, 1, 29));
    }
}
