//! The ISO 8601 chronology: Gregorian rules with the century-related
//! fields redefined over the signed proleptic year, so that the year
//! -500 sits in century -5 rather than century 6 of the previous era.
//!
//! This is the chronology nearly everything uses, so instances get a
//! two-level cache: a small fixed-size table indexed by a hash of the
//! zone id for the common case, backed by an unbounded map for
//! collisions.

use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex};

use lazy_static::lazy_static;
use tracing::trace;

use crate::cal::{Chronology, ChronologyKind, FieldTable};
use crate::field::DateTimeFieldType as T;
use crate::field::{DateTimeField, DividedDateTimeField, RemainderDateTimeField};
use crate::zone::DateTimeZone;


/// Overrides the century fields of a Gregorian table with ones derived
/// from the signed year and weekyear.
pub(crate) fn assemble(base: FieldTable) -> FieldTable {
    let century_of_era: Arc<dyn DateTimeField> =
        Arc::new(DividedDateTimeField::new(base.year.clone(), T::CenturyOfEra, 100,
                                           base.centuries.clone(), Some(base.eras.clone())));
    let year_of_century: Arc<dyn DateTimeField> =
        Arc::new(RemainderDateTimeField::new(base.year.clone(), T::YearOfCentury, 100,
                                             base.centuries.clone()));
    let weekyear_of_century: Arc<dyn DateTimeField> =
        Arc::new(RemainderDateTimeField::new(base.weekyear.clone(), T::WeekyearOfCentury, 100,
                                             base.centuries.clone()));

    FieldTable { century_of_era, year_of_century, weekyear_of_century, ..base }
}

const FAST_CACHE_SIZE: usize = 64;

lazy_static! {
    static ref INSTANCE_UTC: Chronology = Chronology::assemble(ChronologyKind::Iso, DateTimeZone::utc());

    static ref FAST_CACHE: Mutex<Vec<Option<Chronology>>> =
        Mutex::new(vec![None; FAST_CACHE_SIZE]);

    static ref INSTANCES: Mutex<HashMap<DateTimeZone, Chronology>> = Mutex::new(HashMap::new());
}

fn fast_cache_index(zone: &DateTimeZone) -> usize {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    zone.id().hash(&mut hasher);
    hasher.finish() as usize & (FAST_CACHE_SIZE - 1)
}

/// The ISO chronology in UTC.
pub fn instance_utc() -> Chronology {
    INSTANCE_UTC.clone()
}

/// The ISO chronology in the given zone.
pub fn instance(zone: DateTimeZone) -> Chronology {
    if zone == DateTimeZone::utc() {
        return instance_utc();
    }

    let index = fast_cache_index(&zone);
    {
        let fast = FAST_CACHE.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(chrono) = &fast[index] {
            if chrono.zone() == &zone {
                return chrono.clone();
            }
        }
    }

    let chrono = {
        let mut cache = INSTANCES.lock().unwrap_or_else(|e| e.into_inner());
        cache.entry(zone.clone())
             .or_insert_with(|| {
                 trace!(zone = zone.id(), "assembling ISO chronology");
                 Chronology::assemble(ChronologyKind::Iso, zone)
             })
             .clone()
    };

    let mut fast = FAST_CACHE.lock().unwrap_or_else(|e| e.into_inner());
    fast[index] = Some(chrono.clone());
    chrono
}
