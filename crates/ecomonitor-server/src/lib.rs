// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! HTTP service for the EcoMonitor news store.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use ecomonitor_query::QueryLimits;
use std::sync::atomic::{AtomicBool, AtomicU64};
use std::sync::Arc;

mod config;
mod http;
mod middleware;
mod store;

pub use config::{
    env_bool, query_limits_from_env, validate_startup_config_contract, ApiConfig, StoreConfig,
    DEFAULT_BIND, DEFAULT_IDENTITY_HEADER,
};
pub use store::{NewsStore, SqliteNewsAdapter, StoreError};

pub const CRATE_NAME: &str = "ecomonitor-server";

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<NewsStore>,
    pub api: ApiConfig,
    pub limits: QueryLimits,
    pub request_id_seed: Arc<AtomicU64>,
    /// Cleared when shutdown starts so `/healthz` reports draining.
    pub accepting_requests: Arc<AtomicBool>,
}

impl AppState {
    #[must_use]
    pub fn new(store: NewsStore) -> Self {
        Self::with_config(store, ApiConfig::default(), QueryLimits::default())
    }

    #[must_use]
    pub fn with_config(store: NewsStore, api: ApiConfig, limits: QueryLimits) -> Self {
        Self {
            store: Arc::new(store),
            api,
            limits,
            request_id_seed: Arc::new(AtomicU64::new(1)),
            accepting_requests: Arc::new(AtomicBool::new(true)),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(http::handlers::healthz_handler))
        .route("/v1/openapi.json", get(http::handlers::openapi_handler))
        .route("/v1/news", get(http::handlers::search_news_handler))
        .route("/v1/news/:news_id", get(http::handlers::news_by_id_handler))
        .route(
            "/v1/news/:news_id/like",
            post(http::handlers::toggle_like_handler),
        )
        .route(
            "/v1/regions/active",
            get(http::handlers::active_regions_handler),
        )
        .route(
            "/v1/regions/digest",
            get(http::handlers::region_digest_handler),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::request_tracing::request_tracing_middleware,
        ))
        .layer(DefaultBodyLimit::max(state.api.max_body_bytes))
        .with_state(state)
}
