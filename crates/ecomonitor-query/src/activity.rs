// SPDX-License-Identifier: Apache-2.0

use ecomonitor_model::{Region, RegionActivity, RegionId};
use rusqlite::{params_from_iter, types::Value, Connection};

use crate::db::bind_values;
use crate::filters::DateWindow;
use crate::limits::QueryLimits;
use crate::normalize::FilterError;
use crate::predicates::Predicate;
use crate::query_error::{QueryError, QueryErrorCode};

/// Checks a requested region count against the configured ceiling.
pub fn validate_top_n(requested: i64, limits: &QueryLimits) -> Result<u32, FilterError> {
    u32::try_from(requested)
        .ok()
        .filter(|n| *n <= limits.max_active_regions)
        .ok_or(FilterError::TopNOutOfRange {
            requested,
            max: limits.max_active_regions,
        })
}

/// Regions ranked by number of distinct news items, optionally within a
/// post-date window. Ties go to the lower region id; regions without news in
/// the window are omitted.
pub fn active_regions(
    conn: &Connection,
    top_n: u32,
    window: Option<&DateWindow>,
) -> Result<Vec<RegionActivity>, QueryError> {
    if top_n == 0 {
        return Ok(Vec::new());
    }
    let mut sql = String::from(
        "SELECT r.id, r.name, COUNT(DISTINCT m.news_id) AS news_count \
         FROM news_region_membership m \
         JOIN region r ON r.id = m.region_id",
    );
    let mut params = Vec::new();
    if let Some(window) = window {
        let fragment = Predicate::PostedWithin(*window).compile();
        sql.push_str(" JOIN news n ON n.id = m.news_id WHERE ");
        sql.push_str(&fragment.clause);
        params = bind_values(&fragment.params);
    }
    sql.push_str(" GROUP BY r.id, r.name ORDER BY news_count DESC, r.id ASC LIMIT ?");
    params.push(Value::Integer(i64::from(top_n)));

    let mut stmt = conn.prepare_cached(&sql)?;
    let rows = stmt
        .query_map(params_from_iter(params.iter()), |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, i64>(2)?,
            ))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    rows.into_iter()
        .zip(1_u32..)
        .map(|((id, name, count), rank)| {
            let id = RegionId::new(id)
                .map_err(|e| QueryError::new(QueryErrorCode::Sql, e.to_string()))?;
            Ok(RegionActivity {
                region: Region::new(id, name),
                count: u64::try_from(count).unwrap_or(0),
                rank,
            })
        })
        .collect()
}
