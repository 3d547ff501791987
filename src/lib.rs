// src/lib.rs
use anyhow::Result;
use app_state::AppState;
use axum::{middleware::from_fn_with_state, routing::get, Router};

use handlers::{
    boom, health_check, list_users, metric_lookup_handler, metric_names_handler, metrics_handler,
    missing, root_handler, slow,
};

// Public exports (visible outside this module)
pub mod domain;
pub mod filter;

// Internal-only exports (sibling access within this module)
mod app_state;
mod config;
mod handlers;
mod infrastructure;

pub use config::*;
pub use filter::{track_timing, ContextPath, RequestInfo, ResponseStatus, TimingFilter};

// Publicly expose the infrastructure creation functions
pub use infrastructure::metrics::{
    noop::NoopMetrics, prometheus::PrometheusMetrics, registry::RegistryMetrics,
};
pub use infrastructure::{
    create_metrics, // ---
    create_noop_metrics,
    create_prom_metrics,
    create_registry_metrics,
};

/// Install the tracing subscriber. `RUST_LOG` overrides the `info` default.
///
/// Ignores the call if a subscriber is already installed.
pub fn init_tracing() {
    // ---
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .ok(); // ✅ Ignores if already initialized
}

/// Build and start a timing filter from application configuration.
///
/// # Errors
/// Returns an error if the metrics backend cannot be created or started.
pub fn create_filter(config: &AppConfig) -> Result<TimingFilter> {
    // ---
    let metrics = create_metrics(config.backend, &config.prefix)?;
    Ok(TimingFilter::init(&config.filter, metrics)?.with_key_source(config.key_source))
}

/// Build and start a timing filter from environment variables.
pub fn create_filter_from_env() -> Result<TimingFilter> {
    // ---
    create_filter(&AppConfig::from_env())
}

/// Build the HTTP router: demo application, management endpoints, and the
/// timing middleware wrapped around all of them.
///
/// The caller keeps its own clone of `filter` and must call
/// [`TimingFilter::destroy`] once the server has stopped.
pub fn create_router(filter: TimingFilter) -> Router {
    // ---
    let app_state = AppState::new(filter);
    let timing = from_fn_with_state(app_state.filter().clone(), track_timing);

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/metrics/names", get(metric_names_handler))
        .route("/metrics/lookup", get(metric_lookup_handler))
        .nest(
            "/myApp",
            Router::new()
                .route("/users", get(list_users))
                .route("/missing", get(missing))
                .route("/slow", get(slow))
                .route("/boom", get(boom)),
        )
        .layer(timing)
        .with_state(app_state)
}
