mod counters;
mod prometheus_metrics;
mod recorder;

pub use prometheus_metrics::PrometheusMetrics;
use std::sync::Arc;

// Re-export utilities for internal use within this module
pub(crate) use counters::track_http_request;
pub(crate) use recorder::{init_metrics, render_metrics};

/// Creates a new Prometheus metrics implementation.
///
/// This implementation collects metrics in Prometheus format and exposes
/// them through the `/metrics` endpoint for scraping.
///
/// Returns a metrics instance that still has to be started.
pub fn create(prefix: &str) -> anyhow::Result<crate::domain::MetricsPtr> {
    tracing::info!("Initializing Prometheus metrics");
    Ok(Arc::new(PrometheusMetrics::new(prefix)))
}
