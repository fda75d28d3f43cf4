// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use ecomonitor_model::{AuthorId, CompanyId, ParseError, RegionId};
use serde::{Deserialize, Serialize};

use crate::filters::{DateWindow, FilterCriteria, NewsOrder, Pagination};
use crate::limits::QueryLimits;

/// Search parameters as received from a caller, before any validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawFilterParams {
    pub page: Option<u32>,
    pub count: Option<u32>,
    pub by_relevance: Option<bool>,
    pub newer_to_older: Option<bool>,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
    pub region_ids: Vec<i64>,
    pub author_ids: Vec<String>,
    pub company_ids: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum FilterError {
    #[error("You need to specify two date parameters or none of them")]
    HalfOpenDateRange,
    #[error("FromDate must be less that toDate!")]
    InvertedDateRange,
    #[error("unparsable date `{0}`")]
    UnparsableDate(String),
    #[error("count {count} exceeds max page size {max}")]
    PageSizeTooLarge { count: u32, max: u32 },
    #[error("page {page} with count {count} overflows the result offset")]
    OffsetOverflow { page: u32, count: u32 },
    #[error("requested {requested} regions, allowed range is 0..={max}")]
    TopNOutOfRange { requested: i64, max: u32 },
    #[error("requested {requested} news per region, allowed range is 0..={max}")]
    NewsPerRegionOutOfRange { requested: i64, max: u32 },
    #[error("{dimension} lists {count} ids, at most {max} are allowed")]
    TooManyFilterIds {
        dimension: &'static str,
        count: usize,
        max: u32,
    },
    #[error(transparent)]
    InvalidId(#[from] ParseError),
}

const DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// Parses a caller-supplied date or timestamp.
///
/// Accepts a bare calendar date (midnight), a naive timestamp with `T` or a
/// space as separator, or RFC 3339 with an offset (converted to UTC).
pub fn parse_timestamp(input: &str) -> Result<NaiveDateTime, FilterError> {
    let trimmed = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN));
    }
    for format in DATE_TIME_FORMATS {
        if let Ok(at) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(at);
        }
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|at| at.naive_utc())
        .map_err(|_| FilterError::UnparsableDate(input.to_string()))
}

fn end_of_day(at: NaiveDateTime) -> NaiveDateTime {
    let last_second = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
    at.date().and_time(last_second)
}

/// Validates a pair of optional date bounds and widens them to whole days.
///
/// Ordering is checked on the values as given, before widening.
pub fn normalize_date_window(
    from: Option<&str>,
    to: Option<&str>,
) -> Result<Option<DateWindow>, FilterError> {
    match (from, to) {
        (None, None) => Ok(None),
        (Some(_), None) | (None, Some(_)) => Err(FilterError::HalfOpenDateRange),
        (Some(from), Some(to)) => {
            let from = parse_timestamp(from)?;
            let to = parse_timestamp(to)?;
            if from > to {
                return Err(FilterError::InvertedDateRange);
            }
            Ok(Some(DateWindow {
                from: from.date().and_time(NaiveTime::MIN),
                to: end_of_day(to),
            }))
        }
    }
}

fn normalize_pagination(
    raw: &RawFilterParams,
    limits: &QueryLimits,
) -> Result<Pagination, FilterError> {
    let page = raw.page.unwrap_or(0);
    let count = raw.count.unwrap_or(limits.default_page_size);
    if count > limits.max_page_size {
        return Err(FilterError::PageSizeTooLarge {
            count,
            max: limits.max_page_size,
        });
    }
    if u64::from(page)
        .checked_mul(u64::from(count))
        .and_then(|offset| i64::try_from(offset).ok())
        .is_none()
    {
        return Err(FilterError::OffsetOverflow { page, count });
    }
    Ok(Pagination { page, count })
}

fn normalize_author_ids(raw: &[String]) -> Result<BTreeSet<AuthorId>, FilterError> {
    raw.iter()
        .map(|id| id.trim())
        .filter(|id| !id.is_empty())
        .map(|id| AuthorId::parse(id).map_err(FilterError::from))
        .collect()
}

fn capped<T>(
    ids: BTreeSet<T>,
    dimension: &'static str,
    limits: &QueryLimits,
) -> Result<BTreeSet<T>, FilterError> {
    let max = limits.max_filter_ids;
    if ids.len() > max as usize {
        return Err(FilterError::TooManyFilterIds {
            dimension,
            count: ids.len(),
            max,
        });
    }
    Ok(ids)
}

pub fn normalize_filter(
    raw: &RawFilterParams,
    limits: &QueryLimits,
) -> Result<FilterCriteria, FilterError> {
    let window = normalize_date_window(raw.from_date.as_deref(), raw.to_date.as_deref())?;
    let pagination = normalize_pagination(raw, limits)?;
    let region_ids = raw
        .region_ids
        .iter()
        .map(|id| RegionId::new(*id))
        .collect::<Result<BTreeSet<_>, _>>()?;
    let region_ids = capped(region_ids, "region_ids", limits)?;
    let company_ids = raw
        .company_ids
        .iter()
        .map(|id| CompanyId::new(*id))
        .collect::<Result<BTreeSet<_>, _>>()?;
    let company_ids = capped(company_ids, "company_ids", limits)?;
    let author_ids = capped(normalize_author_ids(&raw.author_ids)?, "author_ids", limits)?;
    Ok(FilterCriteria {
        pagination,
        order: NewsOrder::from_flags(
            raw.by_relevance.unwrap_or(false),
            raw.newer_to_older.unwrap_or(true),
        ),
        window,
        region_ids,
        author_ids,
        company_ids,
    })
}
