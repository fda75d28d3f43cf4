// SPDX-License-Identifier: Apache-2.0

use ecomonitor_query::{FilterError, QueryError, QueryErrorCode};

use crate::{ApiError, ApiErrorCode};

pub const API_ERROR_SCHEMA_REF: &str = "#/components/schemas/ApiError";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiErrorMapping {
    pub status_code: u16,
    pub schema_ref: &'static str,
}

#[must_use]
pub fn map_error(error: &ApiError) -> ApiErrorMapping {
    let status_code = match error.code {
        ApiErrorCode::InvalidQueryParameter | ApiErrorCode::InvalidFilter => 400,
        ApiErrorCode::Unauthorized => 401,
        ApiErrorCode::NotFound => 404,
        ApiErrorCode::Timeout => 503,
        _ => 500,
    };

    ApiErrorMapping {
        status_code,
        schema_ref: API_ERROR_SCHEMA_REF,
    }
}

impl From<QueryError> for ApiError {
    fn from(value: QueryError) -> Self {
        match value.code {
            QueryErrorCode::InvalidFilter => Self::invalid_filter(value.message),
            QueryErrorCode::NotFound => Self::not_found(value.message),
            QueryErrorCode::Busy => Self::timeout("store lock"),
            _ => Self::internal(value.message),
        }
    }
}

impl From<FilterError> for ApiError {
    fn from(value: FilterError) -> Self {
        Self::invalid_filter(value.to_string())
    }
}
