// SPDX-License-Identifier: Apache-2.0

use std::time::Instant;

use ecomonitor_model::{NewsId, UserId};
use rusqlite::Connection;
use tracing::debug;

use crate::db::{
    attach_associations, build_search_sql, count_matches, fetch_news_by_id, fetch_news_rows,
    liked_news_ids,
};
use crate::filters::{FilterCriteria, NewsHit, NewsPage};
use crate::likes::is_liked;
use crate::predicates::FilterSpec;
use crate::query_error::QueryError;

/// Runs a filtered, ordered, paged search.
///
/// The COUNT and the page fetch share one read transaction so the totals
/// describe the same snapshot as the items.
pub fn search_news(
    conn: &Connection,
    criteria: &FilterCriteria,
    requesting_user: Option<&UserId>,
) -> Result<NewsPage, QueryError> {
    let started = Instant::now();
    let tx = conn.unchecked_transaction()?;
    let spec = FilterSpec::from_criteria(criteria);
    let pagination = criteria.pagination;

    let total_matches = count_matches(&tx, &spec)?;
    let mut items = if pagination.count == 0 || pagination.offset() >= total_matches {
        Vec::new()
    } else {
        let (sql, params) = build_search_sql(&spec, criteria.order, pagination);
        fetch_news_rows(&tx, &sql, &params)?
    };
    attach_associations(&tx, &mut items)?;

    let liked = match requesting_user {
        Some(user) => {
            let ids: Vec<i64> = items.iter().map(|item| item.id.get()).collect();
            Some(liked_news_ids(&tx, user, &ids)?)
        }
        None => None,
    };
    tx.commit()?;

    let remaining_count = pagination.remaining_after(total_matches, items.len());
    let hits = items
        .into_iter()
        .map(|item| NewsHit {
            liked_by_user: liked.as_ref().map(|set| set.contains(&item.id.get())),
            item,
        })
        .collect::<Vec<_>>();
    debug!(
        predicates = spec.predicates().len(),
        total_matches,
        returned = hits.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "news search executed"
    );
    Ok(NewsPage {
        items: hits,
        total_matches,
        remaining_count,
        is_it_end: remaining_count == 0,
    })
}

pub fn get_news_by_id(
    conn: &Connection,
    news_id: NewsId,
    requesting_user: Option<&UserId>,
) -> Result<NewsHit, QueryError> {
    let tx = conn.unchecked_transaction()?;
    let mut item = fetch_news_by_id(&tx, news_id.get())?
        .ok_or_else(|| QueryError::not_found(format!("news {news_id} not found")))?;
    attach_associations(&tx, std::slice::from_mut(&mut item))?;
    let liked_by_user = match requesting_user {
        Some(user) => Some(is_liked(&tx, user, news_id)?),
        None => None,
    };
    tx.commit()?;
    Ok(NewsHit {
        item,
        liked_by_user,
    })
}
