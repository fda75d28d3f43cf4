// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! HTTP-facing contract of the news service: parameter parsing, response
//! DTOs, error codes and the [`NewsAdapter`] seam. No transport or storage
//! dependencies live here.

pub mod convert;
pub mod dto;
pub mod error_mapping;
mod errors;
pub mod openapi;
pub mod params;
pub mod responses;
mod wire;

pub use convert::{format_hit, format_news, news_page_dto};
pub use dto::{
    FormattedNewsDto, LikeToggleDto, NewsPageDto, RegionActivityDto, RegionDigestDto, RegionDto,
};
pub use error_mapping::{map_error, ApiErrorMapping};
pub use errors::{ApiError, ApiErrorCode, API_ERROR_CODES, UNKNOWN_REQUEST_ID};
pub use openapi::openapi_v1_spec;
pub use params::{
    parse_active_regions_params, parse_news_id, parse_region_digest_params, parse_search_params,
    ActiveRegionsParams, RegionDigestParams, SearchNewsParams,
};
pub use responses::ApiResponseEnvelope;
pub use wire::{
    active_regions_v1, news_by_id_v1, region_digest_v1, search_news_v1, toggle_like_v1,
    NewsAdapter,
};

pub const CRATE_NAME: &str = "ecomonitor-api";
