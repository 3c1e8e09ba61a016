//! Overflow-checked integer arithmetic.
//!
//! Every field and period calculation in the engine routes its additions
//! and multiplications through these primitives, so that adding a large
//! period to an extreme instant surfaces an [`Error::Overflow`] instead of
//! silently wrapping around.

use crate::error::{Error, Result};


/// Adds two values, failing if the result would overflow.
pub fn safe_add(a: i64, b: i64) -> Result<i64> {
    a.checked_add(b).ok_or(Error::Overflow { operation: "add", lhs: a, rhs: b })
}

/// Subtracts the second value from the first, failing on overflow.
pub fn safe_subtract(a: i64, b: i64) -> Result<i64> {
    a.checked_sub(b).ok_or(Error::Overflow { operation: "subtract", lhs: a, rhs: b })
}

/// Multiplies two values, failing if the result would overflow.
pub fn safe_multiply(a: i64, b: i64) -> Result<i64> {
    a.checked_mul(b).ok_or(Error::Overflow { operation: "multiply", lhs: a, rhs: b })
}

/// Negates a value, failing on `i64::MIN`.
pub fn safe_negate(a: i64) -> Result<i64> {
    a.checked_neg().ok_or(Error::Overflow { operation: "negate", lhs: a, rhs: -1 })
}

/// Division that rounds towards negative infinity.
///
/// The plain `/` operator rounds towards zero, which puts every date
/// before 1970 off by one cycle. Only ever called with a positive
/// divisor.
pub fn floor_div(a: i64, b: i64) -> i64 {
    a.div_euclid(b)
}

/// The remainder matching [`floor_div`]: always in `0..b`.
pub fn floor_mod(a: i64, b: i64) -> i64 {
    a.rem_euclid(b)
}

/// Verifies that `value` lies in `lower..=upper`, reporting the bounds in
/// the error when it does not.
pub fn verify_value_bounds(field: &'static str, value: i64, lower: i64, upper: i64) -> Result<()> {
    if value < lower || value > upper {
        Err(Error::IllegalFieldValue { field, value, lower, upper })
    }
    else {
        Ok(())
    }
}

/// Adds an amount to a value, wrapping it back into `min..=max` instead of
/// promoting into a larger unit. Used by `add_wrap_field`.
pub fn wrapped_value(current: i64, amount: i64, min: i64, max: i64) -> Result<i64> {
    let range = safe_add(safe_subtract(max, min)?, 1)?;
    let value = safe_add(current, amount)?;
    Ok(floor_mod(safe_subtract(value, min)?, range) + min)
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn add_overflows() {
        assert!(safe_add(i64::MAX, 1).is_err());
        assert_eq!(safe_add(i64::MAX, 0), Ok(i64::MAX));
    }

    #[test]
    fn subtract_overflows() {
        assert!(safe_subtract(i64::MIN, 1).is_err());
    }

    #[test]
    fn multiply_overflows() {
        assert!(safe_multiply(i64::MAX / 2, 3).is_err());
        assert_eq!(safe_multiply(-3, 4), Ok(-12));
    }

    #[test]
    fn floored_division() {
        assert_eq!(floor_div(7, 4), 1);
        assert_eq!(floor_div(-7, 4), -2);
        assert_eq!(floor_mod(-7, 4), 1);
    }

    #[test]
    fn bounds() {
        assert!(verify_value_bounds("dayOfMonth", 31, 1, 30).is_err());
        assert!(verify_value_bounds("dayOfMonth", 30, 1, 30).is_ok());
    }

    #[test]
    fn wrapping() {
        // November plus two months wraps to January
        assert_eq!(wrapped_value(11, 2, 1, 12), Ok(1));
        assert_eq!(wrapped_value(3, -4, 1, 12), Ok(11));
    }
}
