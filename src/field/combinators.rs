//! Fields defined in terms of other fields.
//!
//! These are the building blocks the assembled chronologies use to
//! redefine a handful of slots without rewriting the underlying calendar
//! logic: century-of-era is the year field divided by a hundred,
//! year-of-century is its remainder, and the clockhours are the hour
//! fields with zero shown as the maximum.

use std::sync::Arc;

use crate::arith::{safe_add, safe_subtract, safe_multiply, floor_div, floor_mod, verify_value_bounds};
use crate::error::Result;
use crate::field::{DurationField, DateTimeField, DateTimeFieldType};


/// A field whose value is another field's value divided (flooring) by a
/// constant.
///
/// For any instant, `divided.get(i) * divisor + remainder.get(i)` equals
/// the base field's value, where `remainder` is the matching
/// [`RemainderDateTimeField`].
#[derive(Debug)]
pub struct DividedDateTimeField {
    base: Arc<dyn DateTimeField>,
    field_type: DateTimeFieldType,
    divisor: i64,
    duration: Arc<dyn DurationField>,
    range: Option<Arc<dyn DurationField>>,
}

impl DividedDateTimeField {

    /// Creates a divided field over `base`. `duration` is the scaled unit
    /// (centuries when dividing years by 100) and `range` the wrapping
    /// unit, if any.
    pub fn new(base: Arc<dyn DateTimeField>,
               field_type: DateTimeFieldType,
               divisor: i64,
               duration: Arc<dyn DurationField>,
               range: Option<Arc<dyn DurationField>>) -> Self {
        Self { base, field_type, divisor, duration, range }
    }

    fn remainder_of(&self, value: i64) -> i64 {
        floor_mod(value, self.divisor)
    }
}

impl DateTimeField for DividedDateTimeField {
    fn field_type(&self) -> DateTimeFieldType {
        self.field_type
    }

    fn get(&self, instant: i64) -> i64 {
        floor_div(self.base.get(instant), self.divisor)
    }

    fn set(&self, instant: i64, value: i64) -> Result<i64> {
        verify_value_bounds(self.name(), value, self.minimum_value(), self.maximum_value())?;
        let remainder = self.remainder_of(self.base.get(instant));
        self.base.set(instant, safe_add(safe_multiply(value, self.divisor)?, remainder)?)
    }

    fn add(&self, instant: i64, amount: i64) -> Result<i64> {
        self.duration.add(instant, amount)
    }

    fn duration_field(&self) -> Arc<dyn DurationField> {
        self.duration.clone()
    }

    fn range_duration_field(&self) -> Option<Arc<dyn DurationField>> {
        self.range.clone()
    }

    fn minimum_value(&self) -> i64 {
        floor_div(self.base.minimum_value(), self.divisor)
    }

    fn maximum_value(&self) -> i64 {
        floor_div(self.base.maximum_value(), self.divisor)
    }

    fn round_floor(&self, instant: i64) -> Result<i64> {
        // the start of this field's unit is the base unit's start with the
        // remainder stripped off
        let value = self.base.get(instant);
        let floored = self.base.round_floor(instant)?;
        self.base.set(floored, safe_subtract(value, self.remainder_of(value))?)
    }
}


/// The counterpart of [`DividedDateTimeField`]: another field's value
/// modulo a constant.
#[derive(Debug)]
pub struct RemainderDateTimeField {
    base: Arc<dyn DateTimeField>,
    field_type: DateTimeFieldType,
    divisor: i64,
    range: Arc<dyn DurationField>,
}

impl RemainderDateTimeField {

    /// Creates a remainder field over `base`; `range` is the scaled unit
    /// it wraps within (centuries for year-of-century).
    pub fn new(base: Arc<dyn DateTimeField>,
               field_type: DateTimeFieldType,
               divisor: i64,
               range: Arc<dyn DurationField>) -> Self {
        Self { base, field_type, divisor, range }
    }
}

impl DateTimeField for RemainderDateTimeField {
    fn field_type(&self) -> DateTimeFieldType {
        self.field_type
    }

    fn get(&self, instant: i64) -> i64 {
        floor_mod(self.base.get(instant), self.divisor)
    }

    fn set(&self, instant: i64, value: i64) -> Result<i64> {
        verify_value_bounds(self.name(), value, 0, self.divisor - 1)?;
        let base_value = self.base.get(instant);
        let stripped = safe_subtract(base_value, floor_mod(base_value, self.divisor))?;
        self.base.set(instant, safe_add(stripped, value)?)
    }

    fn add(&self, instant: i64, amount: i64) -> Result<i64> {
        // promotes into the divided field rather than wrapping
        self.base.add(instant, amount)
    }

    fn duration_field(&self) -> Arc<dyn DurationField> {
        self.base.duration_field()
    }

    fn range_duration_field(&self) -> Option<Arc<dyn DurationField>> {
        Some(self.range.clone())
    }

    fn minimum_value(&self) -> i64 {
        0
    }

    fn maximum_value(&self) -> i64 {
        self.divisor - 1
    }

    fn round_floor(&self, instant: i64) -> Result<i64> {
        self.base.round_floor(instant)
    }
}


/// A view of another field with zero displayed as `maximum + 1`: the
/// clockhour fields, where midnight is hour 24 rather than hour 0.
#[derive(Debug)]
pub struct ZeroIsMaxField {
    base: Arc<dyn DateTimeField>,
    field_type: DateTimeFieldType,
}

impl ZeroIsMaxField {
    pub fn new(base: Arc<dyn DateTimeField>, field_type: DateTimeFieldType) -> Self {
        Self { base, field_type }
    }
}

impl DateTimeField for ZeroIsMaxField {
    fn field_type(&self) -> DateTimeFieldType {
        self.field_type
    }

    fn get(&self, instant: i64) -> i64 {
        let value = self.base.get(instant);
        if value == 0 {
            self.base.maximum_value() + 1
        }
        else {
            value
        }
    }

    fn set(&self, instant: i64, value: i64) -> Result<i64> {
        let max = self.base.maximum_value() + 1;
        verify_value_bounds(self.name(), value, 1, max)?;
        self.base.set(instant, if value == max { 0 } else { value })
    }

    fn add(&self, instant: i64, amount: i64) -> Result<i64> {
        self.base.add(instant, amount)
    }

    fn add_wrap_field(&self, instant: i64, amount: i64) -> Result<i64> {
        self.base.add_wrap_field(instant, amount)
    }

    fn duration_field(&self) -> Arc<dyn DurationField> {
        self.base.duration_field()
    }

    fn range_duration_field(&self) -> Option<Arc<dyn DurationField>> {
        self.base.range_duration_field()
    }

    fn minimum_value(&self) -> i64 {
        1
    }

    fn maximum_value(&self) -> i64 {
        self.base.maximum_value() + 1
    }

    fn round_floor(&self, instant: i64) -> Result<i64> {
        self.base.round_floor(instant)
    }

    fn round_ceiling(&self, instant: i64) -> Result<i64> {
        self.base.round_ceiling(instant)
    }
}
