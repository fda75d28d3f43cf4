// SPDX-License-Identifier: Apache-2.0

use ecomonitor_query::QueryLimits;
use serde::Serialize;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BIND: &str = "0.0.0.0:8080";
pub const DEFAULT_IDENTITY_HEADER: &str = "x-authenticated-user";

#[derive(Debug, Clone, Serialize)]
pub struct ApiConfig {
    pub bind: String,
    pub max_body_bytes: usize,
    pub request_timeout: Duration,
    pub slow_query_threshold: Duration,
    /// Header carrying the caller id established by the upstream gateway.
    pub identity_header: String,
    pub shutdown_drain: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            max_body_bytes: 16 * 1024,
            request_timeout: Duration::from_secs(5),
            slow_query_threshold: Duration::from_millis(200),
            identity_header: DEFAULT_IDENTITY_HEADER.to_string(),
            shutdown_drain: Duration::from_secs(5),
        }
    }
}

impl ApiConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind: env_string("ECOMONITOR_BIND", &defaults.bind),
            max_body_bytes: env_usize("ECOMONITOR_MAX_BODY_BYTES", defaults.max_body_bytes),
            request_timeout: env_duration_ms(
                "ECOMONITOR_REQUEST_TIMEOUT_MS",
                defaults.request_timeout,
            ),
            slow_query_threshold: env_duration_ms(
                "ECOMONITOR_SLOW_QUERY_THRESHOLD_MS",
                defaults.slow_query_threshold,
            ),
            identity_header: env_string("ECOMONITOR_IDENTITY_HEADER", &defaults.identity_header)
                .to_ascii_lowercase(),
            shutdown_drain: env_duration_ms("ECOMONITOR_SHUTDOWN_DRAIN_MS", defaults.shutdown_drain),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StoreConfig {
    pub db_path: PathBuf,
    /// Upper bound on concurrently open read connections.
    pub max_connections: usize,
    pub open_timeout: Duration,
    pub busy_timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("ecomonitor.sqlite"),
            max_connections: 16,
            open_timeout: Duration::from_millis(1_000),
            busy_timeout: Duration::from_millis(5_000),
        }
    }
}

impl StoreConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            db_path: env::var("ECOMONITOR_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.db_path),
            max_connections: env_usize("ECOMONITOR_MAX_CONNECTIONS", defaults.max_connections),
            open_timeout: env_duration_ms("ECOMONITOR_STORE_OPEN_TIMEOUT_MS", defaults.open_timeout),
            busy_timeout: env_duration_ms("ECOMONITOR_BUSY_TIMEOUT_MS", defaults.busy_timeout),
        }
    }
}

#[must_use]
pub fn query_limits_from_env() -> QueryLimits {
    let defaults = QueryLimits::default();
    QueryLimits {
        default_page_size: env_u32("ECOMONITOR_DEFAULT_PAGE_SIZE", defaults.default_page_size),
        max_page_size: env_u32("ECOMONITOR_MAX_PAGE_SIZE", defaults.max_page_size),
        max_filter_ids: env_u32("ECOMONITOR_MAX_FILTER_IDS", defaults.max_filter_ids),
        ..defaults
    }
}

pub fn validate_startup_config_contract(
    api: &ApiConfig,
    store: &StoreConfig,
    limits: &QueryLimits,
) -> Result<(), String> {
    if api.max_body_bytes == 0 {
        return Err("max body bytes must be > 0".to_string());
    }
    if api.request_timeout.is_zero() || store.open_timeout.is_zero() {
        return Err("timeouts must be > 0".to_string());
    }
    if store.max_connections == 0 {
        return Err("max connections must be > 0".to_string());
    }
    if api.identity_header.trim().is_empty() {
        return Err("identity header name must not be empty".to_string());
    }
    if limits.max_page_size == 0 || limits.default_page_size > limits.max_page_size {
        return Err("page size contract requires 0 < default <= max".to_string());
    }
    if limits.max_filter_ids == 0 {
        return Err("max filter ids must be > 0".to_string());
    }
    Ok(())
}

pub fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| match v.as_str() {
            "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
            "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

fn env_string(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_u32(name: &str, default: u32) -> u32 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(default)
}

fn env_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(default)
}

fn env_duration_ms(name: &str, default: Duration) -> Duration {
    let default_ms = u64::try_from(default.as_millis()).unwrap_or(u64::MAX);
    Duration::from_millis(env_u64(name, default_ms))
}
