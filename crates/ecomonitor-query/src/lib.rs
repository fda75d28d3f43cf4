// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! News query engine over the SQLite store.
//!
//! Normalization and predicate compilation are pure; everything that touches
//! a [`rusqlite::Connection`] lives in `db`, `executor`, `likes`, `activity`,
//! `digest` and `schema`.

mod activity;
mod db;
mod digest;
mod executor;
mod filters;
mod likes;
mod limits;
mod normalize;
mod predicates;
mod query_error;
mod row_decode;
mod schema;

pub use activity::{active_regions, validate_top_n};
pub use db::{
    build_count_sql, build_search_sql, explain_query_plan, order_clause, NEWS_COLUMNS,
};
pub use digest::{region_digest, validate_news_per_region};
pub use executor::{get_news_by_id, search_news};
pub use filters::{
    DateWindow, FilterCriteria, LikeToggle, NewsHit, NewsOrder, NewsPage, Pagination,
    RegionDigest, SortDirection, SortKey, TIMESTAMP_FORMAT,
};
pub use likes::{is_liked, toggle_like};
pub use limits::QueryLimits;
pub use normalize::{
    normalize_date_window, normalize_filter, parse_timestamp, FilterError, RawFilterParams,
};
pub use predicates::{FilterSpec, Predicate, SqlFragment, SqlParam};
pub use query_error::{QueryError, QueryErrorCode};
pub use schema::{apply_schema, SCHEMA_VERSION};

pub const CRATE_NAME: &str = "ecomonitor-query";

#[cfg(test)]
mod query_tests;
