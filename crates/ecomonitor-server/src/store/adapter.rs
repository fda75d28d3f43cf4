// SPDX-License-Identifier: Apache-2.0

use ecomonitor_api::{ApiError, NewsAdapter};
use ecomonitor_model::{NewsId, RegionActivity, UserId};
use ecomonitor_query::{
    active_regions, get_news_by_id, region_digest, search_news, toggle_like, DateWindow,
    FilterCriteria, LikeToggle, NewsHit, NewsPage, QueryError, QueryErrorCode, RegionDigest,
};
use rusqlite::Connection;
use std::cell::RefCell;
use std::time::{Duration, Instant};
use tracing::{error, warn};

/// [`NewsAdapter`] over one borrowed SQLite connection.
///
/// Reads work on any connection; `toggle_like` needs the read-write one.
pub struct SqliteNewsAdapter<'a> {
    conn: RefCell<&'a mut Connection>,
    slow_query_threshold: Duration,
}

impl<'a> SqliteNewsAdapter<'a> {
    #[must_use]
    pub fn new(conn: &'a mut Connection, slow_query_threshold: Duration) -> Self {
        Self {
            conn: RefCell::new(conn),
            slow_query_threshold,
        }
    }

    fn timed<T>(
        &self,
        operation: &'static str,
        run: impl FnOnce(&mut Connection) -> Result<T, QueryError>,
    ) -> Result<T, ApiError> {
        let started = Instant::now();
        let out = {
            let mut conn = self.conn.borrow_mut();
            run(&mut **conn)
        };
        let elapsed = started.elapsed();
        if elapsed > self.slow_query_threshold {
            warn!(
                operation,
                elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
                threshold_ms =
                    u64::try_from(self.slow_query_threshold.as_millis()).unwrap_or(u64::MAX),
                "slow query detected"
            );
        }
        if let Err(e) = &out {
            match e.code {
                QueryErrorCode::Sql => error!(operation, error = %e.message, "store query failed"),
                QueryErrorCode::Busy => warn!(operation, error = %e.message, "store lock not granted"),
                _ => {}
            }
        }
        out.map_err(ApiError::from)
    }
}

impl NewsAdapter for SqliteNewsAdapter<'_> {
    fn search_news(
        &self,
        criteria: &FilterCriteria,
        user: Option<&UserId>,
    ) -> Result<NewsPage, ApiError> {
        self.timed("search_news", |conn| search_news(conn, criteria, user))
    }

    fn news_by_id(&self, id: NewsId, user: Option<&UserId>) -> Result<NewsHit, ApiError> {
        self.timed("news_by_id", |conn| get_news_by_id(conn, id, user))
    }

    fn toggle_like(&self, user: &UserId, id: NewsId) -> Result<LikeToggle, ApiError> {
        self.timed("toggle_like", |conn| toggle_like(conn, user, id))
    }

    fn active_regions(
        &self,
        top_n: u32,
        window: Option<&DateWindow>,
    ) -> Result<Vec<RegionActivity>, ApiError> {
        self.timed("active_regions", |conn| {
            let tx = conn.unchecked_transaction()?;
            let ranking = active_regions(&tx, top_n, window)?;
            tx.commit()?;
            Ok(ranking)
        })
    }

    fn region_digest(
        &self,
        regions_count: u32,
        news_per_region: u32,
    ) -> Result<Vec<RegionDigest>, ApiError> {
        self.timed("region_digest", |conn| {
            region_digest(conn, regions_count, news_per_region)
        })
    }
}
