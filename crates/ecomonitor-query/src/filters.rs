// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use ecomonitor_model::{AuthorId, CompanyId, NewsId, NewsItem, Region, RegionId};
use serde::{Deserialize, Serialize};

/// Canonical text layout of stored timestamps. Lexical order equals
/// chronological order, which the date predicates rely on.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    PostDate,
    /// Engagement ranking; the signal is the item's like count.
    Relevance,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewsOrder {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl NewsOrder {
    #[must_use]
    pub fn from_flags(by_relevance: bool, newer_to_older: bool) -> Self {
        Self {
            key: if by_relevance {
                SortKey::Relevance
            } else {
                SortKey::PostDate
            },
            direction: if newer_to_older {
                SortDirection::Descending
            } else {
                SortDirection::Ascending
            },
        }
    }
}

impl Default for NewsOrder {
    fn default() -> Self {
        Self::from_flags(false, true)
    }
}

/// Inclusive post-date window. Both ends are always present.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateWindow {
    pub from: NaiveDateTime,
    pub to: NaiveDateTime,
}

impl DateWindow {
    #[must_use]
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.from <= at && at <= self.to
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// Zero-indexed page number.
    pub page: u32,
    /// Page size. Zero yields an empty page while totals are still reported.
    pub count: u32,
}

impl Pagination {
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.count)
    }

    #[must_use]
    pub fn remaining_after(&self, total_matches: u64, returned: usize) -> u64 {
        total_matches.saturating_sub(self.offset() + returned as u64)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterCriteria {
    pub pagination: Pagination,
    pub order: NewsOrder,
    pub window: Option<DateWindow>,
    pub region_ids: BTreeSet<RegionId>,
    pub author_ids: BTreeSet<AuthorId>,
    pub company_ids: BTreeSet<CompanyId>,
}

impl FilterCriteria {
    #[must_use]
    pub fn unconstrained(pagination: Pagination) -> Self {
        Self {
            pagination,
            order: NewsOrder::default(),
            window: None,
            region_ids: BTreeSet::new(),
            author_ids: BTreeSet::new(),
            company_ids: BTreeSet::new(),
        }
    }
}

/// A news item as seen by one caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewsHit {
    pub item: NewsItem,
    /// `None` when the search was anonymous.
    pub liked_by_user: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewsPage {
    pub items: Vec<NewsHit>,
    pub total_matches: u64,
    pub remaining_count: u64,
    pub is_it_end: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct LikeToggle {
    pub news_id: NewsId,
    /// State after the toggle.
    pub liked: bool,
    pub like_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegionDigest {
    pub region: Region,
    pub activity_count: u64,
    pub items: Vec<NewsItem>,
}
