// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::news::Region;

/// Derived per-request ranking row; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegionActivity {
    pub region: Region,
    pub count: u64,
    /// 1-based position in the ranking.
    pub rank: u32,
}
