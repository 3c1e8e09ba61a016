#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]

#![warn(trivial_casts, trivial_numeric_casts)]
#![warn(unused_qualifications)]

//! Calendar-aware date and time arithmetic over a millisecond timeline.
//!
//! The heart of this library is the *chronological field engine*: the
//! composition of [`Chronology`], [`DateTimeField`](field::DateTimeField),
//! [`DurationField`](field::DurationField), and [`DateTimeZone`] that
//! converts between a flat count of milliseconds since the Unix epoch and
//! structured calendar fields (year, month, day, hour, …), handling
//! variable-length calendar units and zone-offset arithmetic as it goes.
//!
//! # Examples
//!
//! ```
//! use chronology::cal::iso;
//! use chronology::Period;
//!
//! let iso = iso::instance_utc();
//! let instant = iso.datetime_millis(2007, 3, 31, 0).unwrap();
//!
//! // Months are applied before days, so this lands on the 1st of May.
//! let period = Period::zero().with_months(1).with_days(1);
//! let later = iso.add_period(&period, instant, 1).unwrap();
//! assert_eq!(later, iso.datetime_millis(2007, 5, 1, 0).unwrap());
//! ```

pub mod arith;
pub mod cal;
pub mod duration;
pub mod error;
pub mod field;
pub mod instant;
pub mod interval;
pub mod partial;
pub mod period;
pub mod utils;
pub mod zone;
mod system;

pub use crate::cal::Chronology;
pub use crate::duration::Duration;
pub use crate::error::{Error, Result};
pub use crate::instant::Instant;
pub use crate::interval::Interval;
pub use crate::partial::Partial;
pub use crate::period::Period;
pub use crate::zone::DateTimeZone;


/// Milliseconds in one second.
pub const MILLIS_PER_SECOND: i64 = 1_000;

/// Milliseconds in one minute.
pub const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;

/// Milliseconds in one hour.
pub const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;

/// Milliseconds in one standard day. As everywhere in this library, leap
/// seconds are simply ignored.
pub const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;

/// Milliseconds in one standard week.
pub const MILLIS_PER_WEEK: i64 = 7 * MILLIS_PER_DAY;
