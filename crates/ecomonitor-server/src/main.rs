#![forbid(unsafe_code)]

use ecomonitor_server::{
    build_router, env_bool, query_limits_from_env, validate_startup_config_contract, ApiConfig,
    AppState, NewsStore, StoreConfig,
};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::time::timeout;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing(log_json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    if log_json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_current_span(true))
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn wait_for_shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("failed to install ctrl-c handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    init_tracing(env_bool("ECOMONITOR_LOG_JSON", true));

    let api_cfg = ApiConfig::from_env();
    let store_cfg = StoreConfig::from_env();
    let limits = query_limits_from_env();
    validate_startup_config_contract(&api_cfg, &store_cfg, &limits)?;

    let open_timeout = store_cfg.open_timeout;
    let store = timeout(
        open_timeout,
        tokio::task::spawn_blocking(move || NewsStore::open(store_cfg)),
    )
    .await
    .map_err(|_| format!("news store open timed out after {open_timeout:?}"))?
    .map_err(|e| format!("news store open task failed: {e}"))?
    .map_err(|e| format!("news store open failed: {e}"))?;

    let bind = api_cfg.bind.clone();
    let drain = api_cfg.shutdown_drain;
    let state = AppState::with_config(store, api_cfg, limits);
    let accepting = Arc::clone(&state.accepting_requests);
    let store = Arc::clone(&state.store);
    let app = build_router(state);

    let listener = TcpListener::bind(&bind)
        .await
        .map_err(|e| format!("bind {bind} failed: {e}"))?;
    info!(bind = %bind, "ecomonitor server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            wait_for_shutdown_signal().await;
            accepting.store(false, Ordering::Relaxed);
            info!(drain_ms = drain.as_millis() as u64, "shutdown requested, draining");
            tokio::time::sleep(drain).await;
        })
        .await
        .map_err(|e| format!("server failed: {e}"))?;

    store.close();
    info!("ecomonitor server stopped");
    Ok(())
}
