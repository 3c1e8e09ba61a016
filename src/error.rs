//! The crate-wide error type.

/// Error type for all fallible operations in this library.
///
/// Every operation in the field engine is a total function over valid
/// inputs and a fail-fast error over invalid ones; there is no retry or
/// partial-failure behaviour anywhere. Errors propagate synchronously to
/// the immediate caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {

    /// A field was given a value outside its valid range at that instant.
    #[error("value {value} for {field} must be in the range {lower}..={upper}")]
    IllegalFieldValue {
        /// The name of the field that rejected the value.
        field: &'static str,
        /// The rejected value.
        value: i64,
        /// The smallest value the field accepts here.
        lower: i64,
        /// The largest value the field accepts here.
        upper: i64,
    },

    /// A local date-time does not exist in the target zone because it
    /// falls inside a daylight-saving gap.
    #[error("illegal instant due to time zone offset transition: local time {local_instant} does not exist in zone {zone}")]
    IllegalInstant {
        /// The local instant, in milliseconds, that has no UTC equivalent.
        local_instant: i64,
        /// The id of the zone in which the conversion was attempted.
        zone: String,
    },

    /// Safe arithmetic detected a result outside the 64-bit signed range.
    #[error("arithmetic overflow: {operation} of {lhs} and {rhs}")]
    Overflow {
        /// The operation that overflowed.
        operation: &'static str,
        /// Left-hand operand.
        lhs: i64,
        /// Right-hand operand.
        rhs: i64,
    },

    /// A time zone id that is neither `UTC` nor a fixed-offset string.
    #[error("datetime zone id {0:?} is not recognised")]
    UnknownZone(String),

    /// An operation was requested of a field that does not support it.
    #[error("field {0} is not supported")]
    UnsupportedField(&'static str),

    /// A structurally invalid request, such as a partial declaring the
    /// same field twice.
    #[error("{0}")]
    IllegalArgument(String),

    /// A partial was indexed outside `0..size()`.
    #[error("index {index} out of bounds for partial of size {size}")]
    IndexOutOfBounds {
        /// The offending index.
        index: usize,
        /// The size of the partial.
        size: usize,
    },

    /// An interval was constructed with its end before its start.
    #[error("interval end {end} must not precede start {start}")]
    IllegalInterval {
        /// Requested start millis.
        start: i64,
        /// Requested end millis.
        end: i64,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
