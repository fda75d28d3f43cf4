// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryLimits {
    /// Page size used when a search does not name one.
    pub default_page_size: u32,
    pub max_page_size: u32,
    pub max_active_regions: u32,
    pub max_news_per_region: u32,
    /// Cap on distinct ids per filter dimension; each id is one bound parameter.
    pub max_filter_ids: u32,
}

impl Default for QueryLimits {
    fn default() -> Self {
        Self {
            default_page_size: 20,
            max_page_size: 500,
            max_active_regions: 20,
            max_news_per_region: 50,
            max_filter_ids: 100,
        }
    }
}
