// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiResponseEnvelope<T> {
    pub data: T,
}

impl<T> ApiResponseEnvelope<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}
