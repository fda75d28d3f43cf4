// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const UNKNOWN_REQUEST_ID: &str = "req-unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ApiErrorCode {
    InvalidQueryParameter,
    InvalidFilter,
    NotFound,
    Unauthorized,
    Timeout,
    Internal,
}

pub const API_ERROR_CODES: [&str; 6] = [
    "InvalidQueryParameter",
    "InvalidFilter",
    "NotFound",
    "Unauthorized",
    "Timeout",
    "Internal",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
    pub details: Value,
    pub request_id: String,
}

impl ApiError {
    #[must_use]
    pub fn new(
        code: ApiErrorCode,
        message: impl Into<String>,
        details: Value,
        request_id: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            details,
            request_id: request_id.into(),
        }
    }

    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = request_id.into();
        self
    }

    #[must_use]
    pub fn invalid_param(name: &str, value: &str) -> Self {
        Self::new(
            ApiErrorCode::InvalidQueryParameter,
            format!("invalid query parameter: {name}"),
            json!({"field_errors":[{"parameter": name, "reason": "invalid", "value": value}]}),
            UNKNOWN_REQUEST_ID,
        )
    }

    #[must_use]
    pub fn missing_param(name: &str) -> Self {
        Self::new(
            ApiErrorCode::InvalidQueryParameter,
            format!("missing query parameter: {name}"),
            json!({"field_errors":[{"parameter": name, "reason": "missing"}]}),
            UNKNOWN_REQUEST_ID,
        )
    }

    #[must_use]
    pub fn invalid_filter(message: impl Into<String>) -> Self {
        Self::new(
            ApiErrorCode::InvalidFilter,
            message,
            json!({}),
            UNKNOWN_REQUEST_ID,
        )
    }

    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::NotFound, message, json!({}), UNKNOWN_REQUEST_ID)
    }

    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(
            ApiErrorCode::Unauthorized,
            message,
            json!({}),
            UNKNOWN_REQUEST_ID,
        )
    }

    #[must_use]
    pub fn timeout(operation: &str) -> Self {
        Self::new(
            ApiErrorCode::Timeout,
            "store did not answer in time",
            json!({"operation": operation}),
            UNKNOWN_REQUEST_ID,
        )
    }

    #[must_use]
    pub fn internal(cause: impl Into<String>) -> Self {
        Self::new(
            ApiErrorCode::Internal,
            "internal error",
            json!({"cause": cause.into()}),
            UNKNOWN_REQUEST_ID,
        )
    }
}

const _: fn() = || {
    fn assert_traits<T: Serialize + for<'de> Deserialize<'de>>() {}
    assert_traits::<ApiErrorCode>();
};
