//! The field contracts: one trait for units of elapsed time, one for
//! named calendar components.

pub(crate) mod precise;
pub(crate) mod combinators;

use std::fmt::Debug;
use std::sync::Arc;

use crate::arith::{safe_subtract, floor_mod, wrapped_value};
use crate::error::Result;

pub use self::precise::{PreciseDurationField, ScaledDurationField, UnsupportedDurationField, PreciseDateTimeField};
pub use self::combinators::{DividedDateTimeField, RemainderDateTimeField, ZeroIsMaxField};

use self::DurationFieldType::*;
use self::DateTimeFieldType::*;


/// The type of a unit of elapsed time, from milliseconds up to eras.
#[derive(PartialEq, Eq, Debug, Copy, Clone, Hash)]
pub enum DurationFieldType {
    Eras, Centuries, Weekyears, Years, Months, Weeks,
    Days, Halfdays, Hours, Minutes, Seconds, Millis,
}

impl DurationFieldType {

    /// The conventional name of this unit, such as “months”.
    pub fn name(self) -> &'static str {
        match self {
            Eras => "eras",            Centuries => "centuries",
            Weekyears => "weekyears",  Years => "years",
            Months => "months",        Weeks => "weeks",
            Days => "days",            Halfdays => "halfdays",
            Hours => "hours",          Minutes => "minutes",
            Seconds => "seconds",      Millis => "millis",
        }
    }
}


/// The type of a named calendar component.
///
/// Every chronology owns exactly one field instance per variant here.
#[derive(PartialEq, Eq, Debug, Copy, Clone, Hash)]
pub enum DateTimeFieldType {
    Era, CenturyOfEra, YearOfEra, YearOfCentury, Year,
    DayOfYear, MonthOfYear, DayOfMonth,
    WeekyearOfCentury, Weekyear, WeekOfWeekyear, DayOfWeek,
    HalfdayOfDay, HourOfHalfday, ClockhourOfHalfday, ClockhourOfDay, HourOfDay,
    MinuteOfDay, MinuteOfHour, SecondOfDay, SecondOfMinute,
    MillisOfDay, MillisOfSecond,
}

impl DateTimeFieldType {

    /// The conventional name of this field, such as “dayOfMonth”.
    pub fn name(self) -> &'static str {
        match self {
            Era => "era",
            CenturyOfEra => "centuryOfEra",
            YearOfEra => "yearOfEra",
            YearOfCentury => "yearOfCentury",
            Year => "year",
            DayOfYear => "dayOfYear",
            MonthOfYear => "monthOfYear",
            DayOfMonth => "dayOfMonth",
            WeekyearOfCentury => "weekyearOfCentury",
            Weekyear => "weekyear",
            WeekOfWeekyear => "weekOfWeekyear",
            DayOfWeek => "dayOfWeek",
            HalfdayOfDay => "halfdayOfDay",
            HourOfHalfday => "hourOfHalfday",
            ClockhourOfHalfday => "clockhourOfHalfday",
            ClockhourOfDay => "clockhourOfDay",
            HourOfDay => "hourOfDay",
            MinuteOfDay => "minuteOfDay",
            MinuteOfHour => "minuteOfHour",
            SecondOfDay => "secondOfDay",
            SecondOfMinute => "secondOfMinute",
            MillisOfDay => "millisOfDay",
            MillisOfSecond => "millisOfSecond",
        }
    }

    /// The unit this field counts in.
    pub fn duration_type(self) -> DurationFieldType {
        match self {
            Era => Eras,
            CenturyOfEra => Centuries,
            YearOfEra | YearOfCentury | Year => Years,
            DayOfYear | DayOfMonth | DayOfWeek => Days,
            MonthOfYear => Months,
            WeekyearOfCentury | Weekyear => Weekyears,
            WeekOfWeekyear => Weeks,
            HalfdayOfDay => Halfdays,
            HourOfHalfday | ClockhourOfHalfday | ClockhourOfDay | HourOfDay => Hours,
            MinuteOfDay | MinuteOfHour => Minutes,
            SecondOfDay | SecondOfMinute => Seconds,
            MillisOfDay | MillisOfSecond => Millis,
        }
    }

    /// The unit this field wraps within, or `None` for unbounded fields
    /// like the year.
    pub fn range_duration_type(self) -> Option<DurationFieldType> {
        match self {
            Era | Year | Weekyear => None,
            CenturyOfEra | YearOfEra => Some(Eras),
            YearOfCentury | WeekyearOfCentury => Some(Centuries),
            DayOfYear | MonthOfYear => Some(Years),
            DayOfMonth => Some(Months),
            WeekOfWeekyear => Some(Weekyears),
            DayOfWeek => Some(Weeks),
            HalfdayOfDay | ClockhourOfDay | HourOfDay | MinuteOfDay | SecondOfDay | MillisOfDay => Some(Days),
            HourOfHalfday | ClockhourOfHalfday => Some(Halfdays),
            MinuteOfHour => Some(Hours),
            SecondOfMinute => Some(Minutes),
            MillisOfSecond => Some(Seconds),
        }
    }
}


/// A **duration field** represents one unit of elapsed time, convertible
/// to and from milliseconds in a possibly instant-dependent way: months
/// and years vary in length, and in a zoned chronology so do days.
pub trait DurationField: Debug + Send + Sync {

    /// The unit this field measures.
    fn duration_type(&self) -> DurationFieldType;

    /// Whether this field actually supports its operations. The eras
    /// field is the lone holdout that does not.
    fn is_supported(&self) -> bool {
        true
    }

    /// Whether the unit has a fixed millisecond length regardless of the
    /// instant it is measured at.
    fn is_precise(&self) -> bool;

    /// The length of one unit in milliseconds, exact for precise fields
    /// and an average otherwise.
    fn unit_millis(&self) -> i64;

    /// The number of whole units in the given duration, as measured
    /// starting at the given instant.
    fn value(&self, duration: i64, instant: i64) -> Result<i64>;

    /// The millisecond length of the given number of units, as measured
    /// starting at the given instant.
    fn millis_of(&self, value: i64, instant: i64) -> Result<i64>;

    /// Adds a number of units to the instant.
    fn add(&self, instant: i64, value: i64) -> Result<i64>;

    /// The signed count of whole units between the two instants.
    fn difference(&self, minuend: i64, subtrahend: i64) -> Result<i64>;
}


/// A **datetime field** is the accessor and mutator for one calendar
/// component over the millisecond timeline.
///
/// The central invariants, which the engine's tests pin down:
/// `set(i, get(i)) == i` for every valid instant, and
/// `get(set(i, v)) == v` for every `v` within the field's bounds at `i`.
pub trait DateTimeField: Debug + Send + Sync {

    /// The component this field reads and writes.
    fn field_type(&self) -> DateTimeFieldType;

    /// The conventional name of this field.
    fn name(&self) -> &'static str {
        self.field_type().name()
    }

    /// Reads this field's value at the given instant.
    fn get(&self, instant: i64) -> i64;

    /// Returns an instant with this field set to the given value and all
    /// other fields unchanged. The value is validated against the field's
    /// bounds *at that instant* (setting day-of-month to 30 fails in
    /// February) and is never silently clamped.
    fn set(&self, instant: i64, value: i64) -> Result<i64>;

    /// Adds an amount in this field's units, promoting into the next
    /// larger unit when the field's own range overflows: adding two
    /// months to November rolls the year forward.
    fn add(&self, instant: i64, amount: i64) -> Result<i64>;

    /// Adds an amount but wraps within this field alone, never promoting:
    /// adding two months to November gives January of the same year.
    fn add_wrap_field(&self, instant: i64, amount: i64) -> Result<i64> {
        let current = self.get(instant);
        let min = self.minimum_value_at(instant);
        let max = self.maximum_value_at(instant);
        self.set(instant, wrapped_value(current, amount, min, max)?)
    }

    /// The duration field for this field's own unit.
    fn duration_field(&self) -> Arc<dyn DurationField>;

    /// The duration field for the unit this field wraps within, if any.
    fn range_duration_field(&self) -> Option<Arc<dyn DurationField>>;

    /// The smallest value this field ever takes.
    fn minimum_value(&self) -> i64;

    /// The largest value this field ever takes.
    fn maximum_value(&self) -> i64;

    /// The smallest valid value at the given instant.
    fn minimum_value_at(&self, _instant: i64) -> i64 {
        self.minimum_value()
    }

    /// The largest valid value at the given instant. Instant-dependent
    /// for fields like day-of-month.
    fn maximum_value_at(&self, _instant: i64) -> i64 {
        self.maximum_value()
    }

    /// Rounds down to the start of this field's unit: every smaller field
    /// of the result is at its minimum.
    fn round_floor(&self, instant: i64) -> Result<i64>;

    /// Rounds up to the next unit boundary, or stays put if already on one.
    fn round_ceiling(&self, instant: i64) -> Result<i64> {
        let floor = self.round_floor(instant)?;
        if floor == instant {
            Ok(instant)
        }
        else {
            self.duration_field().add(floor, 1)
        }
    }

    /// Rounds to the nearer unit boundary, taking the floor on ties.
    fn round_half_floor(&self, instant: i64) -> Result<i64> {
        let floor = self.round_floor(instant)?;
        let ceiling = self.round_ceiling(instant)?;
        if safe_subtract(instant, floor)? <= safe_subtract(ceiling, instant)? {
            Ok(floor)
        }
        else {
            Ok(ceiling)
        }
    }

    /// Rounds to the nearer unit boundary, taking the ceiling on ties.
    fn round_half_ceiling(&self, instant: i64) -> Result<i64> {
        let floor = self.round_floor(instant)?;
        let ceiling = self.round_ceiling(instant)?;
        if safe_subtract(instant, floor)? < safe_subtract(ceiling, instant)? {
            Ok(floor)
        }
        else {
            Ok(ceiling)
        }
    }

    /// Rounds to the nearer unit boundary; on a tie, picks whichever side
    /// leaves this field's value even.
    fn round_half_even(&self, instant: i64) -> Result<i64> {
        let floor = self.round_floor(instant)?;
        let ceiling = self.round_ceiling(instant)?;
        let to_floor = safe_subtract(instant, floor)?;
        let to_ceiling = safe_subtract(ceiling, instant)?;
        if to_floor < to_ceiling {
            Ok(floor)
        }
        else if to_ceiling < to_floor {
            Ok(ceiling)
        }
        else if floor_mod(self.get(ceiling), 2) == 0 {
            Ok(ceiling)
        }
        else {
            Ok(floor)
        }
    }

    /// The millisecond remainder below this field's unit boundary.
    fn remainder(&self, instant: i64) -> Result<i64> {
        safe_subtract(instant, self.round_floor(instant)?)
    }
}
