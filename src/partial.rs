//! Partial date-times: an ordered set of field values with no instant,
//! zone, or completeness requirement.

use crate::error::{Error, Result};
use crate::field::DateTimeFieldType;


/// A **partial**: parallel lists of field types and values, such as a
/// year-month-day with no time of day attached.
///
/// A partial stores values without judging them; whether 2007-02-30 makes
/// sense is for [`Chronology::validate`](crate::Chronology::validate) to
/// say. The declared field order is preserved and is the order in which
/// values are applied to an instant.
#[derive(PartialEq, Eq, Hash, Debug, Clone)]
pub struct Partial {
    types: Vec<DateTimeFieldType>,
    values: Vec<i64>,
}

impl Partial {

    /// Creates a partial from matching lists of types and values. The
    /// lists must be the same length and no type may appear twice.
    pub fn new(types: Vec<DateTimeFieldType>, values: Vec<i64>) -> Result<Self> {
        if types.len() != values.len() {
            return Err(Error::IndexOutOfBounds { index: values.len(), size: types.len() });
        }
        for (position, field_type) in types.iter().enumerate() {
            if types[..position].contains(field_type) {
                return Err(Error::IllegalArgument(
                    format!("field {} declared twice in a partial", field_type.name())));
            }
        }
        Ok(Self { types, values })
    }

    /// A year-month-day partial.
    pub fn date(year: i64, month: i64, day: i64) -> Self {
        Self {
            types: vec![DateTimeFieldType::Year,
                        DateTimeFieldType::MonthOfYear,
                        DateTimeFieldType::DayOfMonth],
            values: vec![year, month, day],
        }
    }

    /// An hour-minute-second-millis partial.
    pub fn time(hour: i64, minute: i64, second: i64, millis: i64) -> Self {
        Self {
            types: vec![DateTimeFieldType::HourOfDay,
                        DateTimeFieldType::MinuteOfHour,
                        DateTimeFieldType::SecondOfMinute,
                        DateTimeFieldType::MillisOfSecond],
            values: vec![hour, minute, second, millis],
        }
    }

    /// The number of fields in this partial.
    pub fn size(&self) -> usize {
        self.types.len()
    }

    /// The field type at the given position.
    pub fn field_type(&self, index: usize) -> Result<DateTimeFieldType> {
        self.types.get(index).copied()
            .ok_or(Error::IndexOutOfBounds { index, size: self.types.len() })
    }

    /// The value at the given position.
    pub fn value(&self, index: usize) -> Result<i64> {
        self.values.get(index).copied()
            .ok_or(Error::IndexOutOfBounds { index, size: self.values.len() })
    }

    /// The value held for the given field type, if it is present at all.
    pub fn get(&self, field_type: DateTimeFieldType) -> Option<i64> {
        self.types.iter()
            .position(|t| *t == field_type)
            .map(|index| self.values[index])
    }

    /// Whether this partial declares the given field.
    pub fn is_supported(&self, field_type: DateTimeFieldType) -> bool {
        self.types.contains(&field_type)
    }

    /// This partial with one field's value replaced. The field must
    /// already be declared.
    pub fn with_value(&self, field_type: DateTimeFieldType, value: i64) -> Result<Self> {
        match self.types.iter().position(|t| *t == field_type) {
            None => Err(Error::UnsupportedField(field_type.name())),
            Some(index) => {
                let mut values = self.values.clone();
                values[index] = value;
                Ok(Self { types: self.types.clone(), values })
            },
        }
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::field::DateTimeFieldType::*;

    #[test]
    fn lists_must_match() {
        assert!(Partial::new(vec![Year, MonthOfYear], vec![2007]).is_err());
        assert!(Partial::new(vec![Year, Year], vec![2007, 2008]).is_err());
        assert!(Partial::new(vec![Year, MonthOfYear], vec![2007, 3]).is_ok());
    }

    #[test]
    fn lookups() {
        let partial = Partial::date(2007, 2, 14);
        assert_eq!(partial.size(), 3);
        assert_eq!(partial.field_type(1), Ok(MonthOfYear));
        assert_eq!(partial.value(2), Ok(14));
        assert_eq!(partial.get(MonthOfYear), Some(2));
        assert_eq!(partial.get(HourOfDay), None);
        assert!(partial.value(3).is_err());
    }

    #[test]
    fn replacing_a_value() {
        let partial = Partial::date(2007, 2, 14);
        let updated = partial.with_value(DayOfMonth, 28).unwrap();
        assert_eq!(updated.get(DayOfMonth), Some(28));
        assert!(partial.with_value(HourOfDay, 3).is_err());
    }
}
