// SPDX-License-Identifier: Apache-2.0

use crate::http::request_tracing::RequestTrace;
use crate::http::response_contract::{api_error_response, api_error_status, data_response};
use crate::store::{SqliteNewsAdapter, StoreError};
use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use ecomonitor_api::{
    active_regions_v1, news_by_id_v1, openapi_v1_spec, region_digest_v1, search_news_v1,
    toggle_like_v1, ApiError,
};
use serde_json::Value;
use std::future::Future;
use std::sync::atomic::Ordering;
use tokio::time::timeout;
use tracing::{info, warn};

type RawQuery = Vec<(String, String)>;

fn store_failure(operation: &'static str, err: StoreError) -> ApiError {
    match err {
        StoreError::OpenTimeout(_) | StoreError::Closed => ApiError::timeout(operation),
        other => ApiError::internal(other.to_string()),
    }
}

/// Bounds a store call by the request timeout and folds transport-level
/// failures into the API error model.
async fn bounded<T>(
    state: &AppState,
    operation: &'static str,
    call: impl Future<Output = Result<Result<T, ApiError>, StoreError>>,
) -> Result<T, ApiError> {
    match timeout(state.api.request_timeout, call).await {
        Ok(Ok(result)) => result,
        Ok(Err(err)) => Err(store_failure(operation, err)),
        Err(_) => Err(ApiError::timeout(operation)),
    }
}

async fn run_read<T, F>(state: &AppState, operation: &'static str, op: F) -> Result<T, ApiError>
where
    F: FnOnce(&SqliteNewsAdapter<'_>) -> Result<T, ApiError> + Send + 'static,
    T: Send + 'static,
{
    let threshold = state.api.slow_query_threshold;
    let call = state.store.read(move |conn| {
        let adapter = SqliteNewsAdapter::new(conn, threshold);
        op(&adapter)
    });
    bounded(state, operation, call).await
}

/// Writes are not bounded by the request timeout: a 503 from here means the
/// writer or the SQLite lock was never obtained, so nothing was committed.
async fn run_write<T, F>(state: &AppState, operation: &'static str, op: F) -> Result<T, ApiError>
where
    F: FnOnce(&SqliteNewsAdapter<'_>) -> Result<T, ApiError> + Send + 'static,
    T: Send + 'static,
{
    let threshold = state.api.slow_query_threshold;
    state
        .store
        .write(move |conn| {
            let adapter = SqliteNewsAdapter::new(conn, threshold);
            op(&adapter)
        })
        .await
        .unwrap_or_else(|err| Err(store_failure(operation, err)))
}

fn error_response(operation: &'static str, trace: &RequestTrace, err: ApiError) -> Response {
    let err = err.with_request_id(trace.request_id.clone());
    let status = api_error_status(&err);
    if status.is_server_error() {
        warn!(operation, code = ?err.code, details = %err.details, "request failed");
    } else {
        info!(operation, code = ?err.code, message = %err.message, "request rejected");
    }
    api_error_response(status, err)
}

fn finish(operation: &'static str, trace: &RequestTrace, out: Result<Value, ApiError>) -> Response {
    match out {
        Ok(data) => data_response(data),
        Err(err) => error_response(operation, trace, err),
    }
}

pub(crate) async fn healthz_handler(State(state): State<AppState>) -> Response {
    if state.accepting_requests.load(Ordering::Relaxed) {
        (StatusCode::OK, "ok").into_response()
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "draining").into_response()
    }
}

pub(crate) async fn openapi_handler() -> Json<Value> {
    Json(openapi_v1_spec())
}

pub(crate) async fn search_news_handler(
    State(state): State<AppState>,
    Extension(trace): Extension<RequestTrace>,
    Query(query): Query<RawQuery>,
) -> Response {
    let limits = state.limits.clone();
    let out = run_read(&state, "search_news", move |adapter| {
        search_news_v1(adapter, &query, &limits)
    })
    .await;
    finish("search_news", &trace, out)
}

pub(crate) async fn news_by_id_handler(
    State(state): State<AppState>,
    Extension(trace): Extension<RequestTrace>,
    Path(news_id): Path<String>,
    Query(query): Query<RawQuery>,
) -> Response {
    let out = run_read(&state, "news_by_id", move |adapter| {
        news_by_id_v1(adapter, &news_id, &query)
    })
    .await;
    finish("news_by_id", &trace, out)
}

pub(crate) async fn toggle_like_handler(
    State(state): State<AppState>,
    Extension(trace): Extension<RequestTrace>,
    Path(news_id): Path<String>,
    Query(query): Query<RawQuery>,
    headers: HeaderMap,
) -> Response {
    let caller = headers
        .get(state.api.identity_header.as_str())
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string);
    let out = run_write(&state, "toggle_like", move |adapter| {
        toggle_like_v1(adapter, &news_id, &query, caller.as_deref())
    })
    .await;
    finish("toggle_like", &trace, out)
}

pub(crate) async fn active_regions_handler(
    State(state): State<AppState>,
    Extension(trace): Extension<RequestTrace>,
    Query(query): Query<RawQuery>,
) -> Response {
    let limits = state.limits.clone();
    let out = run_read(&state, "active_regions", move |adapter| {
        active_regions_v1(adapter, &query, &limits)
    })
    .await;
    match out {
        Ok(Some(data)) => data_response(data),
        Ok(None) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response("active_regions", &trace, err),
    }
}

pub(crate) async fn region_digest_handler(
    State(state): State<AppState>,
    Extension(trace): Extension<RequestTrace>,
    Query(query): Query<RawQuery>,
) -> Response {
    let limits = state.limits.clone();
    let out = run_read(&state, "region_digest", move |adapter| {
        region_digest_v1(adapter, &query, &limits)
    })
    .await;
    finish("region_digest", &trace, out)
}
