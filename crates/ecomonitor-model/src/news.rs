// SPDX-License-Identifier: Apache-2.0

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::ids::{AuthorId, CompanyId, NewsId, ParseError, RegionId};

pub const TITLE_MAX_LEN: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Region {
    pub id: RegionId,
    pub name: String,
}

impl Region {
    #[must_use]
    pub fn new(id: RegionId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompanyRef {
    pub id: CompanyId,
    pub name: String,
    pub region_id: RegionId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthorRef {
    pub id: AuthorId,
    pub name: String,
}

/// A published news item with its associations resolved.
///
/// `regions` is the union of directly tagged regions and the regions of the
/// item's companies, deduplicated and ordered by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewsItem {
    pub id: NewsId,
    pub title: String,
    pub body: String,
    pub post_date: NaiveDateTime,
    pub update_date: Option<NaiveDateTime>,
    pub source_url: Option<String>,
    pub authors: Vec<AuthorRef>,
    pub companies: Vec<CompanyRef>,
    pub regions: Vec<Region>,
    pub like_count: u64,
}

impl NewsItem {
    pub fn validate(&self) -> Result<(), ParseError> {
        if self.title.trim().is_empty() {
            return Err(ParseError::Empty("title"));
        }
        if self.title.len() > TITLE_MAX_LEN {
            return Err(ParseError::TooLong("title", TITLE_MAX_LEN));
        }
        if let Some(updated) = self.update_date {
            if updated < self.post_date {
                return Err(ParseError::InvalidFormat(
                    "update_date must not precede post_date",
                ));
            }
        }
        Ok(())
    }
}
