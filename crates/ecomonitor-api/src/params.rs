// SPDX-License-Identifier: Apache-2.0

//! Raw query-string pairs to typed request parameters.
//!
//! Pairs are kept in arrival order so list parameters may repeat
//! (`region_ids=1&region_ids=2`) or be comma-separated (`region_ids=1,2`).
//! Anything that does not parse is `InvalidQueryParameter`; semantic checks
//! (date ordering, page size) are left to the filter normalizer.

use ecomonitor_model::{NewsId, UserId};
use ecomonitor_query::{
    normalize_date_window, validate_news_per_region, validate_top_n, DateWindow, QueryLimits,
    RawFilterParams,
};

use crate::errors::ApiError;

pub const PARAM_USER_ID: &str = "userId";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchNewsParams {
    pub filter: RawFilterParams,
    pub user_id: Option<UserId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveRegionsParams {
    pub top_n: u32,
    pub window: Option<DateWindow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionDigestParams {
    pub regions_count: u32,
    pub news_per_region: u32,
}

fn first<'a>(query: &'a [(String, String)], name: &str) -> Option<&'a str> {
    query
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

fn list<'a>(query: &'a [(String, String)], name: &str) -> Vec<&'a str> {
    query
        .iter()
        .filter(|(key, _)| key == name)
        .flat_map(|(_, value)| value.split(','))
        .collect()
}

fn parse_u32(query: &[(String, String)], name: &str) -> Result<Option<u32>, ApiError> {
    first(query, name)
        .map(|raw| {
            raw.trim()
                .parse::<u32>()
                .map_err(|_| ApiError::invalid_param(name, raw))
        })
        .transpose()
}

fn parse_i64(name: &str, raw: &str) -> Result<i64, ApiError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ApiError::invalid_param(name, raw))
}

fn parse_bool(query: &[(String, String)], name: &str) -> Result<Option<bool>, ApiError> {
    first(query, name)
        .map(|raw| match raw.trim() {
            v if v.eq_ignore_ascii_case("true") || v == "1" => Ok(true),
            v if v.eq_ignore_ascii_case("false") || v == "0" => Ok(false),
            _ => Err(ApiError::invalid_param(name, raw)),
        })
        .transpose()
}

fn parse_id_list(query: &[(String, String)], name: &str) -> Result<Vec<i64>, ApiError> {
    list(query, name)
        .into_iter()
        .filter(|raw| !raw.trim().is_empty())
        .map(|raw| parse_i64(name, raw))
        .collect()
}

fn non_empty(query: &[(String, String)], name: &str) -> Option<String> {
    first(query, name)
        .filter(|raw| !raw.trim().is_empty())
        .map(ToString::to_string)
}

/// Optional caller id; an empty value counts as absent.
pub fn parse_user_id(query: &[(String, String)]) -> Result<Option<UserId>, ApiError> {
    match first(query, PARAM_USER_ID).map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => UserId::parse(raw)
            .map(Some)
            .map_err(|_| ApiError::invalid_param(PARAM_USER_ID, raw)),
    }
}

/// Like toggles reject a missing or empty user id instead of treating it as
/// anonymous.
pub fn parse_required_user_id(query: &[(String, String)]) -> Result<UserId, ApiError> {
    match first(query, PARAM_USER_ID) {
        None => Err(ApiError::missing_param(PARAM_USER_ID)),
        Some(raw) if raw.trim().is_empty() => Err(ApiError::invalid_filter("userId is empty")),
        Some(raw) => {
            UserId::parse(raw.trim()).map_err(|_| ApiError::invalid_param(PARAM_USER_ID, raw))
        }
    }
}

pub fn parse_news_id(raw: &str) -> Result<NewsId, ApiError> {
    let value = parse_i64("news_id", raw)?;
    NewsId::new(value).map_err(|_| ApiError::invalid_param("news_id", raw))
}

pub fn parse_search_params(query: &[(String, String)]) -> Result<SearchNewsParams, ApiError> {
    let filter = RawFilterParams {
        page: parse_u32(query, "page")?,
        count: parse_u32(query, "count")?,
        by_relevance: parse_bool(query, "byRelevance")?,
        newer_to_older: parse_bool(query, "newerToOlder")?,
        from_date: non_empty(query, "fromDate"),
        to_date: non_empty(query, "toDate"),
        region_ids: parse_id_list(query, "region_ids")?,
        author_ids: list(query, "author_ids")
            .into_iter()
            .map(ToString::to_string)
            .collect(),
        company_ids: parse_id_list(query, "company_ids")?,
    };
    Ok(SearchNewsParams {
        filter,
        user_id: parse_user_id(query)?,
    })
}

/// `countOfRegions` defaults to 0, which yields an empty ranking.
pub fn parse_active_regions_params(
    query: &[(String, String)],
    limits: &QueryLimits,
) -> Result<ActiveRegionsParams, ApiError> {
    let top_n = match first(query, "countOfRegions") {
        Some(raw) => validate_top_n(parse_i64("countOfRegions", raw)?, limits)?,
        None => 0,
    };
    let from = non_empty(query, "fromDate");
    let to = non_empty(query, "toDate");
    let window = normalize_date_window(from.as_deref(), to.as_deref())?;
    Ok(ActiveRegionsParams { top_n, window })
}

pub fn parse_region_digest_params(
    query: &[(String, String)],
    limits: &QueryLimits,
) -> Result<RegionDigestParams, ApiError> {
    let regions_raw =
        first(query, "regionsCount").ok_or_else(|| ApiError::missing_param("regionsCount"))?;
    let news_raw = first(query, "newsCount").ok_or_else(|| ApiError::missing_param("newsCount"))?;
    Ok(RegionDigestParams {
        regions_count: validate_top_n(parse_i64("regionsCount", regions_raw)?, limits)?,
        news_per_region: validate_news_per_region(parse_i64("newsCount", news_raw)?, limits)?,
    })
}
