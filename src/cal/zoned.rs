//! The zone layer: decorators that make a UTC field table read and write
//! wall-clock values in some zone while instants stay on the UTC
//! timeline.
//!
//! Units shorter than half a day are offset-invariant, so their duration
//! fields pass through untouched and their datetime fields use plain
//! offset arithmetic. Day-sized and larger units go through a full
//! local-time round trip, which is what makes a day across a
//! daylight-saving transition 23 or 25 hours long.

use std::sync::Arc;

use crate::arith::{safe_add, safe_subtract};
use crate::cal::FieldTable;
use crate::error::{Error, Result};
use crate::field::{DateTimeField, DateTimeFieldType, DurationField, DurationFieldType};
use crate::zone::DateTimeZone;
use crate::MILLIS_PER_HOUR;


/// A duration field whose additions happen in local time.
#[derive(Debug)]
pub(crate) struct ZonedDurationField {
    base: Arc<dyn DurationField>,
    zone: DateTimeZone,
}

impl ZonedDurationField {
    pub fn new(base: Arc<dyn DurationField>, zone: DateTimeZone) -> Self {
        Self { base, zone }
    }
}

impl DurationField for ZonedDurationField {
    fn duration_type(&self) -> DurationFieldType {
        self.base.duration_type()
    }

    fn is_supported(&self) -> bool {
        self.base.is_supported()
    }

    fn is_precise(&self) -> bool {
        // a day is only a fixed length when the offset never changes
        self.base.is_precise() && self.zone.is_fixed()
    }

    fn unit_millis(&self) -> i64 {
        self.base.unit_millis()
    }

    fn value(&self, duration: i64, instant: i64) -> Result<i64> {
        self.base.value(duration, self.zone.convert_utc_to_local(instant)?)
    }

    fn millis_of(&self, value: i64, instant: i64) -> Result<i64> {
        self.base.millis_of(value, self.zone.convert_utc_to_local(instant)?)
    }

    fn add(&self, instant: i64, value: i64) -> Result<i64> {
        let local = self.zone.convert_utc_to_local(instant)?;
        let local = self.base.add(local, value)?;
        self.zone.convert_local_to_utc(local, false, Some(instant))
    }

    fn difference(&self, minuend: i64, subtrahend: i64) -> Result<i64> {
        self.base.difference(self.zone.convert_utc_to_local(minuend)?,
                             self.zone.convert_utc_to_local(subtrahend)?)
    }
}


/// A datetime field whose reads and writes happen in local time.
#[derive(Debug)]
pub(crate) struct ZonedDateTimeField {
    base: Arc<dyn DateTimeField>,
    zone: DateTimeZone,
    duration: Arc<dyn DurationField>,
    range: Option<Arc<dyn DurationField>>,

    /// Short precise units can add by plain offset shifting instead of a
    /// local round trip.
    time_field: bool,
}

impl ZonedDateTimeField {
    pub fn new(base: Arc<dyn DateTimeField>,
               zone: DateTimeZone,
               duration: Arc<dyn DurationField>,
               range: Option<Arc<dyn DurationField>>) -> Self {
        let time_field = duration.is_precise() && duration.unit_millis() < 12 * MILLIS_PER_HOUR;
        Self { base, zone, duration, range, time_field }
    }
}

impl DateTimeField for ZonedDateTimeField {
    fn field_type(&self) -> DateTimeFieldType {
        self.base.field_type()
    }

    fn get(&self, instant: i64) -> i64 {
        self.base.get(self.zone.local_millis(instant))
    }

    fn set(&self, instant: i64, value: i64) -> Result<i64> {
        let local = self.zone.convert_utc_to_local(instant)?;
        let local = self.base.set(local, value)?;
        let result = self.zone.convert_local_to_utc(local, false, Some(instant))?;
        if self.get(result) != value {
            // the requested wall-clock value fell into a cutover gap
            return Err(Error::IllegalInstant {
                local_instant: local,
                zone: self.zone.id().to_owned(),
            });
        }
        Ok(result)
    }

    fn add(&self, instant: i64, amount: i64) -> Result<i64> {
        if self.time_field {
            let offset = self.zone.offset(instant);
            let shifted = self.base.add(safe_add(instant, offset)?, amount)?;
            safe_subtract(shifted, offset)
        }
        else {
            let local = self.zone.convert_utc_to_local(instant)?;
            let local = self.base.add(local, amount)?;
            self.zone.convert_local_to_utc(local, false, Some(instant))
        }
    }

    fn add_wrap_field(&self, instant: i64, amount: i64) -> Result<i64> {
        let local = self.zone.convert_utc_to_local(instant)?;
        let local = self.base.add_wrap_field(local, amount)?;
        self.zone.convert_local_to_utc(local, false, Some(instant))
    }

    fn duration_field(&self) -> Arc<dyn DurationField> {
        self.duration.clone()
    }

    fn range_duration_field(&self) -> Option<Arc<dyn DurationField>> {
        self.range.clone()
    }

    fn minimum_value(&self) -> i64 {
        self.base.minimum_value()
    }

    fn maximum_value(&self) -> i64 {
        self.base.maximum_value()
    }

    fn minimum_value_at(&self, instant: i64) -> i64 {
        self.base.minimum_value_at(self.zone.local_millis(instant))
    }

    fn maximum_value_at(&self, instant: i64) -> i64 {
        self.base.maximum_value_at(self.zone.local_millis(instant))
    }

    fn round_floor(&self, instant: i64) -> Result<i64> {
        let local = self.zone.convert_utc_to_local(instant)?;
        let local = self.base.round_floor(local)?;
        self.zone.convert_local_to_utc(local, false, Some(instant))
    }

    fn round_ceiling(&self, instant: i64) -> Result<i64> {
        let local = self.zone.convert_utc_to_local(instant)?;
        let local = self.base.round_ceiling(local)?;
        self.zone.convert_local_to_utc(local, false, Some(instant))
    }

    fn remainder(&self, instant: i64) -> Result<i64> {
        self.base.remainder(self.zone.convert_utc_to_local(instant)?)
    }
}


/// Wraps a UTC field table for the given zone.
pub(crate) fn assemble(base: &FieldTable, zone: &DateTimeZone) -> FieldTable {
    let zoned_duration = |field: &Arc<dyn DurationField>| -> Arc<dyn DurationField> {
        Arc::new(ZonedDurationField::new(field.clone(), zone.clone()))
    };

    // offset-invariant units pass through; eras stay unsupported
    let millis = base.millis.clone();
    let seconds = base.seconds.clone();
    let minutes = base.minutes.clone();
    let hours = base.hours.clone();
    let eras = base.eras.clone();

    let halfdays = zoned_duration(&base.halfdays);
    let days = zoned_duration(&base.days);
    let weeks = zoned_duration(&base.weeks);
    let months = zoned_duration(&base.months);
    let years = zoned_duration(&base.years);
    let weekyears = zoned_duration(&base.weekyears);
    let centuries = zoned_duration(&base.centuries);

    let zoned = |field: &Arc<dyn DateTimeField>,
                 duration: &Arc<dyn DurationField>,
                 range: Option<&Arc<dyn DurationField>>| -> Arc<dyn DateTimeField> {
        Arc::new(ZonedDateTimeField::new(field.clone(), zone.clone(),
                                         duration.clone(), range.cloned()))
    };

    FieldTable {
        era: zoned(&base.era, &eras, None),
        century_of_era: zoned(&base.century_of_era, &centuries, Some(&eras)),
        year_of_era: zoned(&base.year_of_era, &years, Some(&eras)),
        year_of_century: zoned(&base.year_of_century, &years, Some(&centuries)),
        year: zoned(&base.year, &years, None),
        day_of_year: zoned(&base.day_of_year, &days, Some(&years)),
        month_of_year: zoned(&base.month_of_year, &months, Some(&years)),
        day_of_month: zoned(&base.day_of_month, &days, Some(&months)),
        weekyear_of_century: zoned(&base.weekyear_of_century, &weekyears, Some(&centuries)),
        weekyear: zoned(&base.weekyear, &weekyears, None),
        week_of_weekyear: zoned(&base.week_of_weekyear, &weeks, Some(&weekyears)),
        day_of_week: zoned(&base.day_of_week, &days, Some(&weeks)),
        halfday_of_day: zoned(&base.halfday_of_day, &halfdays, Some(&days)),
        hour_of_halfday: zoned(&base.hour_of_halfday, &hours, Some(&halfdays)),
        clockhour_of_halfday: zoned(&base.clockhour_of_halfday, &hours, Some(&halfdays)),
        clockhour_of_day: zoned(&base.clockhour_of_day, &hours, Some(&days)),
        hour_of_day: zoned(&base.hour_of_day, &hours, Some(&days)),
        minute_of_day: zoned(&base.minute_of_day, &minutes, Some(&days)),
        minute_of_hour: zoned(&base.minute_of_hour, &minutes, Some(&hours)),
        second_of_day: zoned(&base.second_of_day, &seconds, Some(&days)),
        second_of_minute: zoned(&base.second_of_minute, &seconds, Some(&minutes)),
        millis_of_day: zoned(&base.millis_of_day, &millis, Some(&days)),
        millis_of_second: zoned(&base.millis_of_second, &millis, Some(&seconds)),

        eras, centuries, weekyears, years, months, weeks,
        days, halfdays, hours, minutes, seconds, millis,
    }
}
