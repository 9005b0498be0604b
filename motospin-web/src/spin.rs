//! Random motorcycle selection with widening retry
//!
//! The provider's coverage is sparse for arbitrary (make, year) pairs, so a
//! spin progressively widens its query instead of failing fast:
//!
//! 1. Sample a make and a year, query (make, year).
//! 2. If empty, drop the year and query (make) alone.
//! 3. If still empty, repeat with freshly sampled values, up to 3 more
//!    cycles.
//! 4. After the last cycle, make one final unfiltered query.
//!
//! Attempts are strictly sequential and bounded: at most 9 provider calls
//! before [`Error::NoData`]. The first non-empty result wins and one of its
//! elements is chosen uniformly at random.

use motospin_common::makes::{MIN_YEAR, MOTORCYCLE_MAKES};
use motospin_common::model::current_year;
use motospin_common::{Error, MotorcycleRecord, Result};
use rand::Rng;
use tracing::{debug, info};

use crate::provider::{MotorcycleQuery, MotorcycleSource};

/// Sampled query cycles before the final unfiltered call (first try + 3 retries).
const WIDEN_CYCLES: u32 = 4;

/// Pick one normalized record via the widening retry algorithm.
pub async fn spin<S, R>(source: &S, rng: &mut R) -> Result<MotorcycleRecord>
where
    S: MotorcycleSource + ?Sized,
    R: Rng + Send,
{
    let latest_year = current_year();

    for cycle in 0..WIDEN_CYCLES {
        let make = MOTORCYCLE_MAKES[rng.gen_range(0..MOTORCYCLE_MAKES.len())];
        let year = rng.gen_range(MIN_YEAR..=latest_year);

        debug!(cycle, make, year, "Spin cycle");

        let narrow = source
            .search(&MotorcycleQuery::by_make_and_year(make, year))
            .await?;
        if let Some(record) = pick(narrow, rng) {
            return Ok(record);
        }

        // Year filter dropped before resampling
        let wide = source.search(&MotorcycleQuery::by_make(make)).await?;
        if let Some(record) = pick(wide, rng) {
            return Ok(record);
        }
    }

    debug!("All sampled queries empty; trying unfiltered");
    let unfiltered = source.search(&MotorcycleQuery::default()).await?;
    if let Some(record) = pick(unfiltered, rng) {
        return Ok(record);
    }

    info!("Spin exhausted every widening attempt");
    Err(Error::NoData)
}

/// Uniformly random element of a non-empty result list.
fn pick<R: Rng>(mut records: Vec<MotorcycleRecord>, rng: &mut R) -> Option<MotorcycleRecord> {
    if records.is_empty() {
        return None;
    }
    let index = rng.gen_range(0..records.len());
    Some(records.swap_remove(index))
}
