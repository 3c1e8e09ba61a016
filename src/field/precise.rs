//! Duration and datetime fields whose units have a fixed millisecond
//! length: the workhorses for everything from milliseconds up to hours.

use std::sync::Arc;

use crate::arith::{safe_add, safe_subtract, safe_multiply, floor_div, floor_mod, verify_value_bounds};
use crate::error::{Error, Result};
use crate::field::{DurationField, DurationFieldType, DateTimeField, DateTimeFieldType};


/// A unit of elapsed time with a constant millisecond length.
#[derive(Debug)]
pub struct PreciseDurationField {
    duration_type: DurationFieldType,
    unit_millis: i64,
}

impl PreciseDurationField {

    /// Creates a field for the given unit; `unit_millis` must be positive.
    pub fn new(duration_type: DurationFieldType, unit_millis: i64) -> Self {
        Self { duration_type, unit_millis }
    }
}

impl DurationField for PreciseDurationField {
    fn duration_type(&self) -> DurationFieldType {
        self.duration_type
    }

    fn is_precise(&self) -> bool {
        true
    }

    fn unit_millis(&self) -> i64 {
        self.unit_millis
    }

    fn value(&self, duration: i64, _instant: i64) -> Result<i64> {
        Ok(duration / self.unit_millis)
    }

    fn millis_of(&self, value: i64, _instant: i64) -> Result<i64> {
        safe_multiply(value, self.unit_millis)
    }

    fn add(&self, instant: i64, value: i64) -> Result<i64> {
        safe_add(instant, safe_multiply(value, self.unit_millis)?)
    }

    fn difference(&self, minuend: i64, subtrahend: i64) -> Result<i64> {
        Ok(safe_subtract(minuend, subtrahend)? / self.unit_millis)
    }
}


/// A duration field that is a whole multiple of another: centuries are
/// years scaled by a hundred.
#[derive(Debug)]
pub struct ScaledDurationField {
    base: Arc<dyn DurationField>,
    duration_type: DurationFieldType,
    scalar: i64,
}

impl ScaledDurationField {
    pub fn new(base: Arc<dyn DurationField>, duration_type: DurationFieldType, scalar: i64) -> Self {
        Self { base, duration_type, scalar }
    }
}

impl DurationField for ScaledDurationField {
    fn duration_type(&self) -> DurationFieldType {
        self.duration_type
    }

    fn is_precise(&self) -> bool {
        self.base.is_precise()
    }

    fn unit_millis(&self) -> i64 {
        self.base.unit_millis() * self.scalar
    }

    fn value(&self, duration: i64, instant: i64) -> Result<i64> {
        Ok(self.base.value(duration, instant)? / self.scalar)
    }

    fn millis_of(&self, value: i64, instant: i64) -> Result<i64> {
        self.base.millis_of(safe_multiply(value, self.scalar)?, instant)
    }

    fn add(&self, instant: i64, value: i64) -> Result<i64> {
        self.base.add(instant, safe_multiply(value, self.scalar)?)
    }

    fn difference(&self, minuend: i64, subtrahend: i64) -> Result<i64> {
        Ok(self.base.difference(minuend, subtrahend)? / self.scalar)
    }
}


/// The duration field for units with no workable length, which is to say
/// eras. Every operation fails with [`Error::UnsupportedField`].
#[derive(Debug)]
pub struct UnsupportedDurationField {
    duration_type: DurationFieldType,
}

impl UnsupportedDurationField {
    pub fn new(duration_type: DurationFieldType) -> Self {
        Self { duration_type }
    }

    fn unsupported(&self) -> Error {
        Error::UnsupportedField(self.duration_type.name())
    }
}

impl DurationField for UnsupportedDurationField {
    fn duration_type(&self) -> DurationFieldType {
        self.duration_type
    }

    fn is_supported(&self) -> bool {
        false
    }

    fn is_precise(&self) -> bool {
        true
    }

    fn unit_millis(&self) -> i64 {
        0
    }

    fn value(&self, _duration: i64, _instant: i64) -> Result<i64> {
        Err(self.unsupported())
    }

    fn millis_of(&self, _value: i64, _instant: i64) -> Result<i64> {
        Err(self.unsupported())
    }

    fn add(&self, _instant: i64, _value: i64) -> Result<i64> {
        Err(self.unsupported())
    }

    fn difference(&self, _minuend: i64, _subtrahend: i64) -> Result<i64> {
        Err(self.unsupported())
    }
}


/// A calendar component whose unit *and* wrapping range both have fixed
/// millisecond lengths: minute-of-hour, hour-of-day, millis-of-day, and
/// the rest of the time-of-day family.
#[derive(Debug)]
pub struct PreciseDateTimeField {
    field_type: DateTimeFieldType,
    unit: Arc<dyn DurationField>,
    range: Arc<dyn DurationField>,
    unit_millis: i64,
    range_count: i64,
}

impl PreciseDateTimeField {

    /// Creates a field counting `unit` within `range`. Both duration
    /// fields must be precise, with the range a whole multiple of the
    /// unit.
    pub fn new(field_type: DateTimeFieldType, unit: Arc<dyn DurationField>, range: Arc<dyn DurationField>) -> Self {
        let unit_millis = unit.unit_millis();
        let range_count = range.unit_millis() / unit_millis;
        Self { field_type, unit, range, unit_millis, range_count }
    }
}

impl DateTimeField for PreciseDateTimeField {
    fn field_type(&self) -> DateTimeFieldType {
        self.field_type
    }

    fn get(&self, instant: i64) -> i64 {
        floor_mod(floor_div(instant, self.unit_millis), self.range_count)
    }

    fn set(&self, instant: i64, value: i64) -> Result<i64> {
        verify_value_bounds(self.name(), value, 0, self.range_count - 1)?;
        let shift = safe_multiply(safe_subtract(value, self.get(instant))?, self.unit_millis)?;
        safe_add(instant, shift)
    }

    fn add(&self, instant: i64, amount: i64) -> Result<i64> {
        self.unit.add(instant, amount)
    }

    fn duration_field(&self) -> Arc<dyn DurationField> {
        self.unit.clone()
    }

    fn range_duration_field(&self) -> Option<Arc<dyn DurationField>> {
        Some(self.range.clone())
    }

    fn minimum_value(&self) -> i64 {
        0
    }

    fn maximum_value(&self) -> i64 {
        self.range_count - 1
    }

    fn round_floor(&self, instant: i64) -> Result<i64> {
        safe_subtract(instant, floor_mod(instant, self.unit_millis))
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::field::DurationFieldType::*;
    use crate::field::DateTimeFieldType::*;
    use crate::{MILLIS_PER_MINUTE, MILLIS_PER_HOUR};

    fn minute_of_hour() -> PreciseDateTimeField {
        let minutes: Arc<dyn DurationField> = Arc::new(PreciseDurationField::new(Minutes, MILLIS_PER_MINUTE));
        let hours: Arc<dyn DurationField> = Arc::new(PreciseDurationField::new(Hours, MILLIS_PER_HOUR));
        PreciseDateTimeField::new(MinuteOfHour, minutes, hours)
    }

    #[test]
    fn reads() {
        let field = minute_of_hour();
        assert_eq!(field.get(0), 0);
        assert_eq!(field.get(25 * MILLIS_PER_MINUTE + 300), 25);
        assert_eq!(field.get(-MILLIS_PER_MINUTE), 59);
    }

    #[test]
    fn round_trip() {
        let field = minute_of_hour();
        for instant in [0, 123_456_789, -987_654_321, 59 * MILLIS_PER_MINUTE] {
            assert_eq!(field.set(instant, field.get(instant)), Ok(instant));
        }
    }

    #[test]
    fn set_validates() {
        let field = minute_of_hour();
        assert!(field.set(0, 60).is_err());
        assert!(field.set(0, -1).is_err());
    }

    #[test]
    fn add_promotes() {
        let field = minute_of_hour();
        // 59 minutes plus two rolls into the next hour
        let instant = 59 * MILLIS_PER_MINUTE;
        assert_eq!(field.add(instant, 2), Ok(61 * MILLIS_PER_MINUTE));
    }

    #[test]
    fn add_wrap_field_stays_put() {
        let field = minute_of_hour();
        let instant = 59 * MILLIS_PER_MINUTE;
        assert_eq!(field.add_wrap_field(instant, 2), Ok(MILLIS_PER_MINUTE));
    }

    #[test]
    fn rounding() {
        let field = minute_of_hour();
        let instant = 5 * MILLIS_PER_MINUTE + 30_001;
        assert_eq!(field.round_floor(instant), Ok(5 * MILLIS_PER_MINUTE));
        assert_eq!(field.round_ceiling(instant), Ok(6 * MILLIS_PER_MINUTE));
        assert_eq!(field.round_half_floor(instant), Ok(6 * MILLIS_PER_MINUTE));
        // exactly halfway: floor wins for half_floor, even value for half_even
        let halfway = 5 * MILLIS_PER_MINUTE + 30_000;
        assert_eq!(field.round_half_floor(halfway), Ok(5 * MILLIS_PER_MINUTE));
        assert_eq!(field.round_half_ceiling(halfway), Ok(6 * MILLIS_PER_MINUTE));
        assert_eq!(field.round_half_even(halfway), Ok(6 * MILLIS_PER_MINUTE));
    }

    #[test]
    fn unsupported_eras() {
        let field = UnsupportedDurationField::new(Eras);
        assert!(!field.is_supported());
        assert!(field.add(0, 1).is_err());
    }
}
