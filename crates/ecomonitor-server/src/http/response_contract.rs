// SPDX-License-Identifier: Apache-2.0

use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use ecomonitor_api::{map_error, ApiError, ApiResponseEnvelope};
use serde_json::{json, Value};

#[must_use]
pub(crate) fn api_error_status(err: &ApiError) -> StatusCode {
    StatusCode::from_u16(map_error(err).status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

#[must_use]
pub(crate) fn api_error_response(status: StatusCode, err: ApiError) -> Response {
    let body = Json(json!({"error": err}));
    let mut resp = (status, body).into_response();
    if status == StatusCode::SERVICE_UNAVAILABLE {
        resp.headers_mut()
            .insert("retry-after", HeaderValue::from_static("1"));
    }
    resp
}

#[must_use]
pub(crate) fn data_response(data: Value) -> Response {
    (StatusCode::OK, Json(ApiResponseEnvelope::new(data))).into_response()
}
