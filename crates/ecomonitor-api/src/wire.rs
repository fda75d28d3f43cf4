// SPDX-License-Identifier: Apache-2.0

use ecomonitor_model::{NewsId, RegionActivity, UserId};
use ecomonitor_query::{
    normalize_filter, DateWindow, FilterCriteria, LikeToggle, NewsHit, NewsPage, QueryLimits,
    RegionDigest,
};
use serde::Serialize;
use serde_json::Value;

use crate::convert::{
    format_hit, like_toggle_dto, news_page_dto, region_activity_dto, region_digest_dto,
};
use crate::errors::ApiError;
use crate::params::{
    parse_active_regions_params, parse_news_id, parse_region_digest_params,
    parse_required_user_id, parse_search_params, parse_user_id,
};

/// Storage seam behind the v1 handlers. Implementations run synchronously;
/// callers decide which thread they run on.
pub trait NewsAdapter {
    fn search_news(
        &self,
        criteria: &FilterCriteria,
        user: Option<&UserId>,
    ) -> Result<NewsPage, ApiError>;

    fn news_by_id(&self, id: NewsId, user: Option<&UserId>) -> Result<NewsHit, ApiError>;

    fn toggle_like(&self, user: &UserId, id: NewsId) -> Result<LikeToggle, ApiError>;

    fn active_regions(
        &self,
        top_n: u32,
        window: Option<&DateWindow>,
    ) -> Result<Vec<RegionActivity>, ApiError>;

    fn region_digest(
        &self,
        regions_count: u32,
        news_per_region: u32,
    ) -> Result<Vec<RegionDigest>, ApiError>;
}

fn to_value<T: Serialize>(dto: &T) -> Result<Value, ApiError> {
    serde_json::to_value(dto).map_err(|e| ApiError::internal(e.to_string()))
}

pub fn search_news_v1<A: NewsAdapter + ?Sized>(
    adapter: &A,
    query: &[(String, String)],
    limits: &QueryLimits,
) -> Result<Value, ApiError> {
    let params = parse_search_params(query)?;
    let criteria = normalize_filter(&params.filter, limits)?;
    let page = adapter.search_news(&criteria, params.user_id.as_ref())?;
    to_value(&news_page_dto(&page))
}

pub fn news_by_id_v1<A: NewsAdapter + ?Sized>(
    adapter: &A,
    raw_news_id: &str,
    query: &[(String, String)],
) -> Result<Value, ApiError> {
    let id = parse_news_id(raw_news_id)?;
    let user = parse_user_id(query)?;
    let hit = adapter.news_by_id(id, user.as_ref())?;
    to_value(&format_hit(&hit))
}

/// `authenticated` is the caller id established upstream; the toggle only
/// proceeds when it names the same user as the `userId` parameter.
pub fn toggle_like_v1<A: NewsAdapter + ?Sized>(
    adapter: &A,
    raw_news_id: &str,
    query: &[(String, String)],
    authenticated: Option<&str>,
) -> Result<Value, ApiError> {
    let id = parse_news_id(raw_news_id)?;
    let user = parse_required_user_id(query)?;
    match authenticated {
        Some(caller) if caller == user.as_str() => {}
        Some(_) => {
            return Err(ApiError::unauthorized(
                "userId does not match the authenticated caller",
            ))
        }
        None => return Err(ApiError::unauthorized("missing authenticated caller")),
    }
    let toggle = adapter.toggle_like(&user, id)?;
    to_value(&like_toggle_dto(&toggle))
}

/// `Ok(None)` when no region has news in the window.
pub fn active_regions_v1<A: NewsAdapter + ?Sized>(
    adapter: &A,
    query: &[(String, String)],
    limits: &QueryLimits,
) -> Result<Option<Value>, ApiError> {
    let params = parse_active_regions_params(query, limits)?;
    let ranking = adapter.active_regions(params.top_n, params.window.as_ref())?;
    if ranking.is_empty() {
        return Ok(None);
    }
    let dtos = ranking.iter().map(region_activity_dto).collect::<Vec<_>>();
    to_value(&dtos).map(Some)
}

pub fn region_digest_v1<A: NewsAdapter + ?Sized>(
    adapter: &A,
    query: &[(String, String)],
    limits: &QueryLimits,
) -> Result<Value, ApiError> {
    let params = parse_region_digest_params(query, limits)?;
    let digest = adapter.region_digest(params.regions_count, params.news_per_region)?;
    let dtos = digest.iter().map(region_digest_dto).collect::<Vec<_>>();
    to_value(&dtos)
}
