// SPDX-License-Identifier: Apache-2.0

use rusqlite::Connection;

use crate::activity::active_regions;
use crate::db::{attach_associations, fetch_recent_for_region};
use crate::filters::RegionDigest;
use crate::limits::QueryLimits;
use crate::normalize::FilterError;
use crate::query_error::QueryError;

pub fn validate_news_per_region(requested: i64, limits: &QueryLimits) -> Result<u32, FilterError> {
    u32::try_from(requested)
        .ok()
        .filter(|n| *n <= limits.max_news_per_region)
        .ok_or(FilterError::NewsPerRegionOutOfRange {
            requested,
            max: limits.max_news_per_region,
        })
}

/// Newest items for each of the `regions_count` most active regions of all
/// time, in ranking order.
pub fn region_digest(
    conn: &Connection,
    regions_count: u32,
    news_per_region: u32,
) -> Result<Vec<RegionDigest>, QueryError> {
    let tx = conn.unchecked_transaction()?;
    let ranking = active_regions(&tx, regions_count, None)?;
    let mut digests = Vec::with_capacity(ranking.len());
    for activity in ranking {
        let mut items = if news_per_region == 0 {
            Vec::new()
        } else {
            fetch_recent_for_region(&tx, activity.region.id, news_per_region)?
        };
        attach_associations(&tx, &mut items)?;
        digests.push(RegionDigest {
            region: activity.region,
            activity_count: activity.count,
            items,
        });
    }
    tx.commit()?;
    Ok(digests)
}
