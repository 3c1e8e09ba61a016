//! Chronologies: assembled tables of fields over a calendar system and a
//! time zone.
//!
//! A [`Chronology`] owns one instance of every datetime and duration
//! field, built in layers. The Gregorian layer supplies the raw calendar
//! rules, the ISO layer redefines the century-related fields on top of
//! it, and the zoned layer wraps every field so that reads and writes
//! happen in local time while instants stay in UTC. Chronologies are
//! immutable and cached, so obtaining one is cheap after the first call.

pub mod gregorian;
pub mod iso;

mod fields;
mod zoned;

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::arith::{safe_add, safe_multiply, safe_subtract, verify_value_bounds};
use crate::error::{Error, Result};
use crate::field::{DateTimeField, DateTimeFieldType, DurationField, DurationFieldType};
use crate::partial::Partial;
use crate::period::Period;
use crate::zone::DateTimeZone;


/// The complete set of fields a chronology hands out: one slot per
/// [`DurationFieldType`] and one per [`DateTimeFieldType`].
#[derive(Debug, Clone)]
pub(crate) struct FieldTable {
    pub eras: Arc<dyn DurationField>,
    pub centuries: Arc<dyn DurationField>,
    pub weekyears: Arc<dyn DurationField>,
    pub years: Arc<dyn DurationField>,
    pub months: Arc<dyn DurationField>,
    pub weeks: Arc<dyn DurationField>,
    pub days: Arc<dyn DurationField>,
    pub halfdays: Arc<dyn DurationField>,
    pub hours: Arc<dyn DurationField>,
    pub minutes: Arc<dyn DurationField>,
    pub seconds: Arc<dyn DurationField>,
    pub millis: Arc<dyn DurationField>,

    pub era: Arc<dyn DateTimeField>,
    pub century_of_era: Arc<dyn DateTimeField>,
    pub year_of_era: Arc<dyn DateTimeField>,
    pub year_of_century: Arc<dyn DateTimeField>,
    pub year: Arc<dyn DateTimeField>,
    pub day_of_year: Arc<dyn DateTimeField>,
    pub month_of_year: Arc<dyn DateTimeField>,
    pub day_of_month: Arc<dyn DateTimeField>,
    pub weekyear_of_century: Arc<dyn DateTimeField>,
    pub weekyear: Arc<dyn DateTimeField>,
    pub week_of_weekyear: Arc<dyn DateTimeField>,
    pub day_of_week: Arc<dyn DateTimeField>,
    pub halfday_of_day: Arc<dyn DateTimeField>,
    pub hour_of_halfday: Arc<dyn DateTimeField>,
    pub clockhour_of_halfday: Arc<dyn DateTimeField>,
    pub clockhour_of_day: Arc<dyn DateTimeField>,
    pub hour_of_day: Arc<dyn DateTimeField>,
    pub minute_of_day: Arc<dyn DateTimeField>,
    pub minute_of_hour: Arc<dyn DateTimeField>,
    pub second_of_day: Arc<dyn DateTimeField>,
    pub second_of_minute: Arc<dyn DateTimeField>,
    pub millis_of_day: Arc<dyn DateTimeField>,
    pub millis_of_second: Arc<dyn DateTimeField>,
}

impl FieldTable {
    pub fn field(&self, field_type: DateTimeFieldType) -> Arc<dyn DateTimeField> {
        use crate::field::DateTimeFieldType::*;
        match field_type {
            Era => self.era.clone(),
            CenturyOfEra => self.century_of_era.clone(),
            YearOfEra => self.year_of_era.clone(),
            YearOfCentury => self.year_of_century.clone(),
            Year => self.year.clone(),
            DayOfYear => self.day_of_year.clone(),
            MonthOfYear => self.month_of_year.clone(),
            DayOfMonth => self.day_of_month.clone(),
            WeekyearOfCentury => self.weekyear_of_century.clone(),
            Weekyear => self.weekyear.clone(),
            WeekOfWeekyear => self.week_of_weekyear.clone(),
            DayOfWeek => self.day_of_week.clone(),
            HalfdayOfDay => self.halfday_of_day.clone(),
            HourOfHalfday => self.hour_of_halfday.clone(),
            ClockhourOfHalfday => self.clockhour_of_halfday.clone(),
            ClockhourOfDay => self.clockhour_of_day.clone(),
            HourOfDay => self.hour_of_day.clone(),
            MinuteOfDay => self.minute_of_day.clone(),
            MinuteOfHour => self.minute_of_hour.clone(),
            SecondOfDay => self.second_of_day.clone(),
            SecondOfMinute => self.second_of_minute.clone(),
            MillisOfDay => self.millis_of_day.clone(),
            MillisOfSecond => self.millis_of_second.clone(),
        }
    }

    pub fn duration(&self, duration_type: DurationFieldType) -> Arc<dyn DurationField> {
        use crate::field::DurationFieldType::*;
        match duration_type {
            Eras => self.eras.clone(),
            Centuries => self.centuries.clone(),
            Weekyears => self.weekyears.clone(),
            Years => self.years.clone(),
            Months => self.months.clone(),
            Weeks => self.weeks.clone(),
            Days => self.days.clone(),
            Halfdays => self.halfdays.clone(),
            Hours => self.hours.clone(),
            Minutes => self.minutes.clone(),
            Seconds => self.seconds.clone(),
            Millis => self.millis.clone(),
        }
    }
}


/// Which calendar rules a chronology is assembled from.
#[derive(PartialEq, Eq, Hash, Debug, Copy, Clone)]
pub enum ChronologyKind {
    /// The proleptic Gregorian calendar on its own.
    Gregorian,

    /// The ISO 8601 calendar: Gregorian rules with the century fields
    /// redefined over the signed year.
    Iso,
}

impl ChronologyKind {
    fn name(self) -> &'static str {
        match self {
            ChronologyKind::Gregorian => "GregorianChronology",
            ChronologyKind::Iso => "ISOChronology",
        }
    }
}

#[derive(Debug)]
struct ChronologyInner {
    kind: ChronologyKind,
    zone: DateTimeZone,

    /// Fields in this chronology's own zone.
    fields: FieldTable,

    /// The same calendar's fields in UTC, used when a calculation must
    /// work on local instants directly.
    utc_fields: FieldTable,
}


/// A **chronology**: a calendar system pinned to a time zone, holding one
/// field instance per field type.
///
/// Cheap to clone; two chronologies compare equal when their calendar
/// rules and zone agree.
///
/// ### Examples
///
/// ```
/// use chronology::cal::iso;
///
/// let chrono = iso::instance_utc();
/// let instant = chrono.datetime_millis_at(2001, 2, 3, 4, 5, 6, 0).unwrap();
/// assert_eq!(chrono.day_of_week().get(instant), 6);   // a Saturday
/// ```
#[derive(Debug, Clone)]
pub struct Chronology {
    inner: Arc<ChronologyInner>,
}

impl PartialEq for Chronology {
    fn eq(&self, other: &Self) -> bool {
        self.inner.kind == other.inner.kind && self.inner.zone == other.inner.zone
    }
}

impl Eq for Chronology {}

impl Hash for Chronology {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.kind.hash(state);
        self.inner.zone.hash(state);
    }
}

impl fmt::Display for Chronology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.inner.kind.name(), self.inner.zone.id())
    }
}

impl Chronology {

    pub(crate) fn assemble(kind: ChronologyKind, zone: DateTimeZone) -> Self {
        let utc_fields = match kind {
            ChronologyKind::Gregorian => gregorian::assemble(),
            ChronologyKind::Iso => iso::assemble(gregorian::assemble()),
        };
        let fields = if zone == DateTimeZone::utc() {
            utc_fields.clone()
        }
        else {
            zoned::assemble(&utc_fields, &zone)
        };

        Self {
            inner: Arc::new(ChronologyInner { kind, zone, fields, utc_fields }),
        }
    }

    /// Which calendar rules this chronology follows.
    pub fn kind(&self) -> ChronologyKind {
        self.inner.kind
    }

    /// The zone this chronology operates in.
    pub fn zone(&self) -> &DateTimeZone {
        &self.inner.zone
    }

    /// The same calendar rules in another zone. Returns `self` untouched
    /// when the zone already matches.
    pub fn with_zone(&self, zone: DateTimeZone) -> Chronology {
        if zone == self.inner.zone {
            return self.clone();
        }
        match self.inner.kind {
            ChronologyKind::Gregorian => gregorian::instance(zone),
            ChronologyKind::Iso => iso::instance(zone),
        }
    }

    /// The same calendar rules in UTC.
    pub fn with_utc(&self) -> Chronology {
        self.with_zone(DateTimeZone::utc())
    }

    /// The field instance for the given type, in this chronology's zone.
    pub fn field(&self, field_type: DateTimeFieldType) -> Arc<dyn DateTimeField> {
        self.inner.fields.field(field_type)
    }

    /// The duration field instance for the given unit.
    pub fn duration(&self, duration_type: DurationFieldType) -> Arc<dyn DurationField> {
        self.inner.fields.duration(duration_type)
    }

    /// Combines a calendar date and a millisecond-of-day into a UTC
    /// instant, interpreting the values as wall-clock time in this
    /// chronology's zone. Fails when any value is out of range or the
    /// resulting local time falls into a daylight-saving gap.
    pub fn datetime_millis(&self, year: i64, month: i64, day: i64, millis_of_day: i64) -> Result<i64> {
        let f = &self.inner.utc_fields;
        let mut instant = f.year.set(0, year)?;
        instant = f.month_of_year.set(instant, month)?;
        instant = f.day_of_month.set(instant, day)?;
        instant = f.millis_of_day.set(instant, millis_of_day)?;
        self.local_to_utc(instant)
    }

    /// As [`datetime_millis`](Self::datetime_millis), with the time of day
    /// broken out into components.
    pub fn datetime_millis_at(&self, year: i64, month: i64, day: i64,
                              hour: i64, minute: i64, second: i64, millis: i64) -> Result<i64> {
        let f = &self.inner.utc_fields;
        let mut instant = f.year.set(0, year)?;
        instant = f.month_of_year.set(instant, month)?;
        instant = f.day_of_month.set(instant, day)?;
        instant = f.hour_of_day.set(instant, hour)?;
        instant = f.minute_of_hour.set(instant, minute)?;
        instant = f.second_of_minute.set(instant, second)?;
        instant = f.millis_of_second.set(instant, millis)?;
        self.local_to_utc(instant)
    }

    fn local_to_utc(&self, instant_local: i64) -> Result<i64> {
        let zone = &self.inner.zone;
        if *zone == DateTimeZone::utc() {
            return Ok(instant_local);
        }
        let offset = zone.offset_from_local(instant_local);
        let instant_utc = safe_subtract(instant_local, offset)?;
        if zone.offset(instant_utc) != offset {
            return Err(Error::IllegalInstant {
                local_instant: instant_local,
                zone: zone.id().to_owned(),
            });
        }
        Ok(instant_utc)
    }

    /// Adds a period to an instant, each component scaled by `scalar`.
    ///
    /// Components are applied from the largest unit down, so the result of
    /// adding one month and one day to the 31st of March is the 1st of
    /// May, not the 1st of April plus a month.
    pub fn add_period(&self, period: &Period, instant: i64, scalar: i64) -> Result<i64> {
        let f = &self.inner.fields;
        let components: [(i64, &Arc<dyn DurationField>); 8] = [
            (period.years(), &f.years),
            (period.months(), &f.months),
            (period.weeks(), &f.weeks),
            (period.days(), &f.days),
            (period.hours(), &f.hours),
            (period.minutes(), &f.minutes),
            (period.seconds(), &f.seconds),
            (period.millis(), &f.millis),
        ];

        let mut instant = instant;
        for (value, field) in components {
            if value != 0 {
                instant = field.add(instant, safe_multiply(value, scalar)?)?;
            }
        }
        Ok(instant)
    }

    /// Adds a plain millisecond duration, scaled, to an instant.
    pub fn add_duration(&self, instant: i64, duration_millis: i64, scalar: i64) -> Result<i64> {
        safe_add(instant, safe_multiply(duration_millis, scalar)?)
    }

    /// The period between two instants, measured unit by unit from years
    /// down to milliseconds. Each unit takes as much of the remaining
    /// span as it can; the instants may be in either order.
    pub fn period_between(&self, start: i64, end: i64) -> Result<Period> {
        let f = &self.inner.fields;
        let fields: [&Arc<dyn DurationField>; 8] = [
            &f.years, &f.months, &f.weeks, &f.days,
            &f.hours, &f.minutes, &f.seconds, &f.millis,
        ];

        let mut cursor = start;
        let mut values = [0_i64; 8];
        for (value, field) in values.iter_mut().zip(fields) {
            *value = field.difference(end, cursor)?;
            if *value != 0 {
                cursor = field.add(cursor, *value)?;
            }
        }

        let [years, months, weeks, days, hours, minutes, seconds, millis] = values;
        Ok(Period::new(years, months, weeks, days, hours, minutes, seconds, millis))
    }

    /// Checks every value in the partial: first against each field's
    /// absolute bounds, then against the bounds that hold once the
    /// preceding fields are applied, which is what rejects the 30th of
    /// February.
    pub fn validate(&self, partial: &Partial) -> Result<()> {
        for index in 0..partial.size() {
            let field = self.inner.utc_fields.field(partial.field_type(index)?);
            verify_value_bounds(field.name(), partial.value(index)?,
                                field.minimum_value(), field.maximum_value())?;
        }

        let mut instant = 0;
        for index in 0..partial.size() {
            let field = self.inner.utc_fields.field(partial.field_type(index)?);
            instant = field.set(instant, partial.value(index)?)?;
        }
        Ok(())
    }

    /// Reads the partial's fields off the given instant, in the partial's
    /// declared order.
    pub fn partial_values(&self, partial: &Partial, instant: i64) -> Result<Vec<i64>> {
        let mut values = Vec::with_capacity(partial.size());
        for index in 0..partial.size() {
            values.push(self.field(partial.field_type(index)?).get(instant));
        }
        Ok(values)
    }

    /// Sets every field of the partial onto the instant, in the partial's
    /// declared order.
    pub fn set_partial(&self, partial: &Partial, instant: i64) -> Result<i64> {
        let mut instant = instant;
        for index in 0..partial.size() {
            let field = self.field(partial.field_type(index)?);
            instant = field.set(instant, partial.value(index)?)?;
        }
        Ok(instant)
    }

    // Named accessors for every duration field.

    pub fn eras(&self) -> Arc<dyn DurationField> { self.inner.fields.eras.clone() }
    pub fn centuries(&self) -> Arc<dyn DurationField> { self.inner.fields.centuries.clone() }
    pub fn weekyears(&self) -> Arc<dyn DurationField> { self.inner.fields.weekyears.clone() }
    pub fn years(&self) -> Arc<dyn DurationField> { self.inner.fields.years.clone() }
    pub fn months(&self) -> Arc<dyn DurationField> { self.inner.fields.months.clone() }
    pub fn weeks(&self) -> Arc<dyn DurationField> { self.inner.fields.weeks.clone() }
    pub fn days(&self) -> Arc<dyn DurationField> { self.inner.fields.days.clone() }
    pub fn halfdays(&self) -> Arc<dyn DurationField> { self.inner.fields.halfdays.clone() }
    pub fn hours(&self) -> Arc<dyn DurationField> { self.inner.fields.hours.clone() }
    pub fn minutes(&self) -> Arc<dyn DurationField> { self.inner.fields.minutes.clone() }
    pub fn seconds(&self) -> Arc<dyn DurationField> { self.inner.fields.seconds.clone() }
    pub fn millis(&self) -> Arc<dyn DurationField> { self.inner.fields.millis.clone() }

    // And for every datetime field.

    pub fn era(&self) -> Arc<dyn DateTimeField> { self.inner.fields.era.clone() }
    pub fn century_of_era(&self) -> Arc<dyn DateTimeField> { self.inner.fields.century_of_era.clone() }
    pub fn year_of_era(&self) -> Arc<dyn DateTimeField> { self.inner.fields.year_of_era.clone() }
    pub fn year_of_century(&self) -> Arc<dyn DateTimeField> { self.inner.fields.year_of_century.clone() }
    pub fn year(&self) -> Arc<dyn DateTimeField> { self.inner.fields.year.clone() }
    pub fn day_of_year(&self) -> Arc<dyn DateTimeField> { self.inner.fields.day_of_year.clone() }
    pub fn month_of_year(&self) -> Arc<dyn DateTimeField> { self.inner.fields.month_of_year.clone() }
    pub fn day_of_month(&self) -> Arc<dyn DateTimeField> { self.inner.fields.day_of_month.clone() }
    pub fn weekyear_of_century(&self) -> Arc<dyn DateTimeField> { self.inner.fields.weekyear_of_century.clone() }
    pub fn weekyear(&self) -> Arc<dyn DateTimeField> { self.inner.fields.weekyear.clone() }
    pub fn week_of_weekyear(&self) -> Arc<dyn DateTimeField> { self.inner.fields.week_of_weekyear.clone() }
    pub fn day_of_week(&self) -> Arc<dyn DateTimeField> { self.inner.fields.day_of_week.clone() }
    pub fn halfday_of_day(&self) -> Arc<dyn DateTimeField> { self.inner.fields.halfday_of_day.clone() }
    pub fn hour_of_halfday(&self) -> Arc<dyn DateTimeField> { self.inner.fields.hour_of_halfday.clone() }
    pub fn clockhour_of_halfday(&self) -> Arc<dyn DateTimeField> { self.inner.fields.clockhour_of_halfday.clone() }
    pub fn clockhour_of_day(&self) -> Arc<dyn DateTimeField> { self.inner.fields.clockhour_of_day.clone() }
    pub fn hour_of_day(&self) -> Arc<dyn DateTimeField> { self.inner.fields.hour_of_day.clone() }
    pub fn minute_of_day(&self) -> Arc<dyn DateTimeField> { self.inner.fields.minute_of_day.clone() }
    pub fn minute_of_hour(&self) -> Arc<dyn DateTimeField> { self.inner.fields.minute_of_hour.clone() }
    pub fn second_of_day(&self) -> Arc<dyn DateTimeField> { self.inner.fields.second_of_day.clone() }
    pub fn second_of_minute(&self) -> Arc<dyn DateTimeField> { self.inner.fields.second_of_minute.clone() }
    pub fn millis_of_day(&self) -> Arc<dyn DateTimeField> { self.inner.fields.millis_of_day.clone() }
    pub fn millis_of_second(&self) -> Arc<dyn DateTimeField> { self.inner.fields.millis_of_second.clone() }
}
