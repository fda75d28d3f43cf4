// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

/// Wire format of timestamps in responses.
pub const DTO_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegionDto {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct CompanyDto {
    pub id: i64,
    pub name: String,
    pub region_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthorDto {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct FormattedNewsDto {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub post_date: String,
    pub update_date: Option<String>,
    pub source_url: Option<String>,
    pub authors: Vec<AuthorDto>,
    pub companies: Vec<CompanyDto>,
    pub regions: Vec<RegionDto>,
    pub like_count: u64,
    /// Omitted for anonymous requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_liked_by_user: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct NewsPageDto {
    pub items: Vec<FormattedNewsDto>,
    pub remaining_count: u64,
    pub is_it_end: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct LikeToggleDto {
    pub news_id: i64,
    pub liked: bool,
    pub like_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegionActivityDto {
    pub region: RegionDto,
    pub count: u64,
    pub rank: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct RegionDigestDto {
    pub region: RegionDto,
    pub activity_count: u64,
    pub items: Vec<FormattedNewsDto>,
}
