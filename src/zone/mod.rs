//! Time zones, and the conversion between the UTC timeline and local
//! (wall-clock) time.
//!
//! A zone here is either a fixed offset or a precalculated list of
//! timespans separated by the instants at which the offset changes over.
//! UTC-to-local is a pure function; the reverse is not, because a local
//! time inside a daylight-saving gap corresponds to no UTC instant and a
//! local time inside an overlap corresponds to two. The resolution
//! policies for those cases live in [`DateTimeZone::offset_from_local`]
//! and [`DateTimeZone::convert_local_to_utc`], and are treated as a fixed
//! contract: callers rely on the exact choices made here.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use lazy_static::lazy_static;
use tracing::trace;

use crate::arith::{safe_add, safe_subtract};
use crate::error::{Error, Result};
use crate::{MILLIS_PER_SECOND, MILLIS_PER_MINUTE, MILLIS_PER_HOUR};


/// The largest offset magnitude a zone may carry: ±23:59:59.999.
pub const MAX_OFFSET_MILLIS: i64 = 24 * MILLIS_PER_HOUR - 1;


/// An individual timespan with a fixed offset, used both for whole fixed
/// zones and for the stretches between transitions.
#[derive(PartialEq, Eq, Hash, Debug, Copy, Clone)]
pub struct Timespan {

    /// The *total* offset from UTC in effect during this timespan, in
    /// milliseconds: the standard offset plus any daylight-saving part.
    pub offset: i64,

    /// The offset ignoring any daylight-saving adjustment.
    pub standard_offset: i64,
}

#[derive(PartialEq, Eq, Hash, Debug)]
enum ZoneData {
    Fixed(Timespan),

    /// A first timespan assumed to have been in effect up until the
    /// initial transition, then `(transition instant, timespan)` pairs in
    /// ascending order. Each transition instant is the first UTC
    /// millisecond of its timespan.
    Precalculated {
        first: Timespan,
        rest: Vec<(i64, Timespan)>,
    },
}

#[derive(PartialEq, Eq, Hash, Debug)]
struct Inner {
    id: String,
    data: ZoneData,
}


/// A **time zone**: a mapping from UTC instants to wall-clock offsets,
/// with transition search.
///
/// Values are cheap to clone and compare equal when their id and offset
/// data agree, regardless of how they were obtained.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct DateTimeZone {
    inner: Arc<Inner>,
}

lazy_static! {
    static ref UTC: DateTimeZone = DateTimeZone::fixed("UTC".to_owned(), 0, 0);

    static ref FIXED_OFFSET_CACHE: Mutex<HashMap<i64, DateTimeZone>> = Mutex::new(HashMap::new());
}

fn verify_offset(offset: i64) -> Result<()> {
    if offset < -MAX_OFFSET_MILLIS || offset > MAX_OFFSET_MILLIS {
        Err(Error::IllegalFieldValue {
            field: "offset",
            value: offset,
            lower: -MAX_OFFSET_MILLIS,
            upper: MAX_OFFSET_MILLIS,
        })
    }
    else {
        Ok(())
    }
}

impl DateTimeZone {

    fn fixed(id: String, offset: i64, standard_offset: i64) -> Self {
        Self {
            inner: Arc::new(Inner {
                id,
                data: ZoneData::Fixed(Timespan { offset, standard_offset }),
            }),
        }
    }

    /// The UTC zone itself.
    pub fn utc() -> Self {
        UTC.clone()
    }

    /// Looks up a zone by id: the literal `UTC`, or a fixed-offset string
    /// of the form `[+-]HH:mm[:ss[.SSS]]`. Anything else would be the
    /// domain of an external zoneinfo provider, and fails with
    /// [`Error::UnknownZone`] here.
    pub fn for_id(id: &str) -> Result<Self> {
        if id == "UTC" {
            return Ok(Self::utc());
        }
        match parse_offset_id(id) {
            Some(offset) => Self::for_offset_millis(offset),
            None => Err(Error::UnknownZone(id.to_owned())),
        }
    }

    /// Returns the fixed zone with the given total offset, reusing a
    /// cached instance where possible. An offset of zero is the UTC zone.
    pub fn for_offset_millis(offset: i64) -> Result<Self> {
        verify_offset(offset)?;
        if offset == 0 {
            return Ok(Self::utc());
        }

        let mut cache = FIXED_OFFSET_CACHE.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(zone) = cache.get(&offset) {
            return Ok(zone.clone());
        }

        let zone = Self::fixed(format_offset(offset), offset, offset);
        trace!(id = zone.id(), "fixed offset zone cached");
        let _ = cache.insert(offset, zone.clone());
        Ok(zone)
    }

    /// Returns the fixed zone for an hours-and-minutes offset. The two
    /// components must not disagree in sign.
    pub fn for_offset_hours_minutes(hours: i64, minutes: i64) -> Result<Self> {
        verify_value_sign(hours, minutes)?;
        crate::arith::verify_value_bounds("offsetHours", hours, -23, 23)?;
        crate::arith::verify_value_bounds("offsetMinutes", minutes.abs(), 0, 59)?;
        Self::for_offset_millis(hours * MILLIS_PER_HOUR + minutes * MILLIS_PER_MINUTE)
    }

    /// Builds a zone from a precalculated list of transitions, the shape
    /// an external zoneinfo provider (or a test) supplies. The first
    /// timespan is in effect before the initial transition; transitions
    /// must be strictly ascending.
    pub fn precalculated(id: &str, first: Timespan, rest: Vec<(i64, Timespan)>) -> Result<Self> {
        verify_offset(first.offset)?;
        verify_offset(first.standard_offset)?;
        let mut previous = i64::MIN;
        for &(transition, span) in &rest {
            verify_offset(span.offset)?;
            verify_offset(span.standard_offset)?;
            if transition <= previous {
                return Err(Error::IllegalFieldValue {
                    field: "transition",
                    value: transition,
                    lower: previous.saturating_add(1),
                    upper: i64::MAX,
                });
            }
            previous = transition;
        }

        Ok(Self {
            inner: Arc::new(Inner {
                id: id.to_owned(),
                data: ZoneData::Precalculated { first, rest },
            }),
        })
    }

    /// This zone's id.
    pub fn id(&self) -> &str {
        &self.inner.id
    }

    /// Whether this zone has no transitions, so is always at the same
    /// offset from UTC.
    pub fn is_fixed(&self) -> bool {
        match self.inner.data {
            ZoneData::Fixed(_) => true,
            ZoneData::Precalculated { ref rest, .. } => rest.is_empty(),
        }
    }

    fn span_at(&self, instant: i64) -> &Timespan {
        match self.inner.data {
            ZoneData::Fixed(ref span) => span,
            ZoneData::Precalculated { ref first, ref rest } => {
                match rest.iter().take_while(|entry| entry.0 <= instant).last() {
                    None => first,
                    Some(entry) => &entry.1,
                }
            },
        }
    }

    /// The total offset from UTC at the given UTC instant, in
    /// milliseconds: wall-clock time minus UTC.
    pub fn offset(&self, instant: i64) -> i64 {
        self.span_at(instant).offset
    }

    /// The offset ignoring any daylight-saving adjustment.
    pub fn standard_offset(&self, instant: i64) -> i64 {
        self.span_at(instant).standard_offset
    }

    /// Whether the given instant is outside any daylight-saving period.
    pub fn is_standard_offset(&self, instant: i64) -> bool {
        let span = self.span_at(instant);
        span.offset == span.standard_offset
    }

    /// The instant of the next offset change strictly after the given
    /// instant, or the instant itself if there is none. A fixed zone
    /// always returns the instant unchanged.
    pub fn next_transition(&self, instant: i64) -> i64 {
        match self.inner.data {
            ZoneData::Fixed(_) => instant,
            ZoneData::Precalculated { ref rest, .. } => {
                rest.iter()
                    .map(|entry| entry.0)
                    .find(|&transition| transition > instant)
                    .unwrap_or(instant)
            },
        }
    }

    /// The last millisecond *before* the offset change at or before the
    /// given instant, or the instant itself if there is none. Reading the
    /// offset at the result gives the pre-transition offset.
    pub fn previous_transition(&self, instant: i64) -> i64 {
        match self.inner.data {
            ZoneData::Fixed(_) => instant,
            ZoneData::Precalculated { ref rest, .. } => {
                rest.iter()
                    .map(|entry| entry.0)
                    .take_while(|&transition| transition <= instant)
                    .last()
                    .map(|transition| transition - 1)
                    .unwrap_or(instant)
            },
        }
    }

    /// The offset to subtract from a *local* instant to reach UTC.
    ///
    /// This is the hard direction. The offset at the local instant read
    /// as if it were UTC is only an estimate; applying it and re-reading
    /// may disagree near a transition. When the estimates straddle a gap,
    /// the local-time estimate is kept so that the result lands on or
    /// after the transition rather than being pushed back before it.
    /// When they agree but an overlap has just ended, the pre-transition
    /// offset is preferred, which resolves an ambiguous local time to its
    /// earlier occurrence.
    pub fn offset_from_local(&self, instant_local: i64) -> i64 {
        let offset_local = self.offset(instant_local);
        let instant_adjusted = instant_local.saturating_sub(offset_local);
        let offset_adjusted = self.offset(instant_adjusted);

        if offset_local != offset_adjusted {
            if offset_local - offset_adjusted < 0 {
                let candidate_local = instant_local.saturating_sub(offset_local);
                let candidate_adjusted = instant_local.saturating_sub(offset_adjusted);

                let mut next_local = self.next_transition(instant_adjusted);
                if next_local == candidate_local {
                    next_local = i64::MAX;
                }
                let mut next_adjusted = self.next_transition(candidate_adjusted);
                if next_adjusted == candidate_adjusted {
                    next_adjusted = i64::MAX;
                }

                if next_local != next_adjusted {
                    return offset_local;
                }
            }
        }
        else if offset_local >= 0 {
            let previous = self.previous_transition(instant_adjusted);
            if previous < instant_adjusted {
                let offset_previous = self.offset(previous);
                let diff = offset_previous - offset_local;
                if instant_adjusted - previous <= diff {
                    return offset_previous;
                }
            }
        }

        offset_adjusted
    }

    /// Converts a UTC instant to the local instant with the same
    /// wall-clock reading, failing on overflow.
    pub fn convert_utc_to_local(&self, instant_utc: i64) -> Result<i64> {
        safe_add(instant_utc, self.offset(instant_utc))
    }

    /// Converts a local instant back to UTC.
    ///
    /// If `original_instant_utc` is supplied and its offset still
    /// reproduces a consistent local time, that offset is reused, which
    /// keeps relative calculations from flipping their offset choice
    /// mid-stream. Otherwise [`offset_from_local`](Self::offset_from_local)
    /// decides: an overlap resolves to its earlier occurrence, and a
    /// local time inside a gap either fails with
    /// [`Error::IllegalInstant`] in `strict` mode or is pushed through to
    /// the other side of the transition when lenient.
    pub fn convert_local_to_utc(&self, instant_local: i64, strict: bool, original_instant_utc: Option<i64>) -> Result<i64> {
        if let Some(original) = original_instant_utc {
            let offset_original = self.offset(original);
            if self.offset(instant_local.saturating_sub(offset_original)) == offset_original {
                return safe_subtract(instant_local, offset_original);
            }
        }

        let offset = self.offset_from_local(instant_local);
        let instant_utc = safe_subtract(instant_local, offset)?;
        if strict && self.offset(instant_utc) != offset {
            return Err(Error::IllegalInstant {
                local_instant: instant_local,
                zone: self.id().to_owned(),
            });
        }
        Ok(instant_utc)
    }

    /// Forces resolution of an instant that may sit inside a
    /// daylight-saving overlap, by inspecting the offsets three hours to
    /// either side. Outside an overlap the instant comes back unchanged;
    /// inside one, `prefer_later` selects which of the two repeats of the
    /// wall-clock time to land on.
    pub fn adjust_offset(&self, instant: i64, prefer_later: bool) -> i64 {
        let offset_before = self.offset(instant.saturating_sub(3 * MILLIS_PER_HOUR));
        let offset_after = self.offset(instant.saturating_add(3 * MILLIS_PER_HOUR));
        if offset_before <= offset_after {
            // a gap, or no transition at all
            return instant;
        }

        let diff = offset_before - offset_after;
        let transition = self.next_transition(instant.saturating_sub(3 * MILLIS_PER_HOUR));
        let overlap_start = transition - diff;
        let overlap_end = transition + diff;
        if instant < overlap_start || instant >= overlap_end {
            return instant;
        }

        if instant - overlap_start >= diff {
            // in the later of the two repeats
            if prefer_later { instant } else { instant - diff }
        }
        else {
            // in the earlier of the two repeats
            if prefer_later { instant + diff } else { instant }
        }
    }

    /// Converts a UTC instant to the instant in `new_zone` with the same
    /// wall-clock fields as it has in this zone.
    pub fn millis_keep_local(&self, new_zone: &DateTimeZone, old_instant_utc: i64) -> Result<i64> {
        if new_zone == self {
            return Ok(old_instant_utc);
        }
        let local = self.convert_utc_to_local(old_instant_utc)?;
        new_zone.convert_local_to_utc(local, false, Some(old_instant_utc))
    }

    /// Local conversion for field reads, which must not fail: saturates
    /// at the ends of the timeline instead of reporting overflow.
    pub(crate) fn local_millis(&self, instant_utc: i64) -> i64 {
        instant_utc.saturating_add(self.offset(instant_utc))
    }
}

impl fmt::Debug for DateTimeZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DateTimeZone({})", self.id())
    }
}


fn verify_value_sign(hours: i64, minutes: i64) -> Result<()> {
    if (hours > 0 && minutes < 0) || (hours < 0 && minutes > 0) {
        Err(Error::IllegalFieldValue {
            field: "offsetMinutes",
            value: minutes,
            lower: if hours < 0 { -59 } else { 0 },
            upper: if hours < 0 { 0 } else { 59 },
        })
    }
    else {
        Ok(())
    }
}

/// Parses `[+-]HH:mm[:ss[.SSS]]`, returning the offset in milliseconds,
/// or `None` if the string is not of that shape at all.
fn parse_offset_id(id: &str) -> Option<i64> {
    let (sign, rest) = match id.chars().next()? {
        '+' => (1, &id[1..]),
        '-' => (-1, &id[1..]),
        _ => return None,
    };

    let mut parts = rest.splitn(3, ':');
    let hours = parse_two_digits(parts.next()?)?;
    let minutes = parse_two_digits(parts.next()?)?;

    let (seconds, millis) = match parts.next() {
        None => (0, 0),
        Some(tail) => {
            match tail.split_once('.') {
                None => (parse_two_digits(tail)?, 0),
                Some((ss, sss)) => {
                    if sss.len() != 3 || !sss.bytes().all(|b| b.is_ascii_digit()) {
                        return None;
                    }
                    (parse_two_digits(ss)?, sss.parse::<i64>().ok()?)
                },
            }
        },
    };

    if hours > 23 || minutes > 59 || seconds > 59 {
        return None;
    }

    Some(sign * (hours * MILLIS_PER_HOUR
               + minutes * MILLIS_PER_MINUTE
               + seconds * MILLIS_PER_SECOND
               + millis))
}

fn parse_two_digits(part: &str) -> Option<i64> {
    if part.len() == 2 && part.bytes().all(|b| b.is_ascii_digit()) {
        part.parse().ok()
    }
    else {
        None
    }
}

/// Formats an offset the way [`parse_offset_id`] reads it, leaving the
/// seconds and milliseconds off when they are zero.
fn format_offset(offset: i64) -> String {
    let sign = if offset < 0 { '-' } else { '+' };
    let mut value = offset.abs();

    let millis = value % MILLIS_PER_SECOND;
    value /= MILLIS_PER_SECOND;
    let seconds = value % 60;
    value /= 60;
    let minutes = value % 60;
    let hours = value / 60;

    if millis != 0 {
        format!("{}{:02}:{:02}:{:02}.{:03}", sign, hours, minutes, seconds, millis)
    }
    else if seconds != 0 {
        format!("{}{:02}:{:02}:{:02}", sign, hours, minutes, seconds)
    }
    else {
        format!("{}{:02}:{:02}", sign, hours, minutes)
    }
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn utc_is_fixed() {
        let utc = DateTimeZone::utc();
        assert!(utc.is_fixed());
        assert_eq!(utc.offset(123_456_789), 0);
        assert_eq!(utc.next_transition(500), 500);
        assert_eq!(utc.previous_transition(500), 500);
    }

    #[test]
    fn fixed_zone_ids() {
        let zone = DateTimeZone::for_offset_hours_minutes(5, 30).unwrap();
        assert_eq!(zone.id(), "+05:30");

        let zone = DateTimeZone::for_offset_millis(-(25 * MILLIS_PER_MINUTE + 21 * MILLIS_PER_SECOND)).unwrap();
        assert_eq!(zone.id(), "-00:25:21");
    }

    #[test]
    fn for_id_round_trips() {
        for id in ["+02:00", "-09:30", "+01:02:03", "-00:00:00.500"] {
            let zone = DateTimeZone::for_id(id).unwrap();
            assert_eq!(zone.id(), id);
        }
        assert_eq!(DateTimeZone::for_id("UTC").unwrap(), DateTimeZone::utc());
    }

    #[test]
    fn for_id_rejects_nonsense() {
        for id in ["Mars/Olympus_Mons", "+24:00", "+1:00", "02:00", "+02:60", ""] {
            assert!(DateTimeZone::for_id(id).is_err(), "{:?} should not parse", id);
        }
    }

    #[test]
    fn offset_magnitude_is_bounded() {
        assert!(DateTimeZone::for_offset_millis(MAX_OFFSET_MILLIS).is_ok());
        assert!(DateTimeZone::for_offset_millis(MAX_OFFSET_MILLIS + 1).is_err());
        assert!(DateTimeZone::for_offset_millis(-MAX_OFFSET_MILLIS - 1).is_err());
    }

    #[test]
    fn sign_mismatch() {
        assert!(DateTimeZone::for_offset_hours_minutes(-4, 30).is_err());
        assert!(DateTimeZone::for_offset_hours_minutes(-4, -30).is_ok());
        assert!(DateTimeZone::for_offset_hours_minutes(4, 0).is_ok());
    }

    #[test]
    fn cache_returns_equal_zones() {
        let a = DateTimeZone::for_offset_millis(2 * MILLIS_PER_HOUR).unwrap();
        let b = DateTimeZone::for_id("+02:00").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn transitions_must_ascend() {
        let span = Timespan { offset: 0, standard_offset: 0 };
        let later = Timespan { offset: MILLIS_PER_HOUR, standard_offset: 0 };
        assert!(DateTimeZone::precalculated("Test", span, vec![(100, later), (100, span)]).is_err());
        assert!(DateTimeZone::precalculated("Test", span, vec![(100, later), (200, span)]).is_ok());
    }
}
