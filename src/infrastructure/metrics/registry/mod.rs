// src/infrastructure/metrics/registry/mod.rs
mod registry_metrics;

pub use registry_metrics::RegistryMetrics;
use std::sync::Arc;

/// Creates a new in-process registry metrics implementation.
///
/// Aggregates are kept in memory and can be looked up one by one through
/// the management endpoints, each under `{prefix}.{endpoint}.responseCode.{status}`.
///
/// Returns a metrics instance that still has to be started.
pub fn create(prefix: &str) -> anyhow::Result<crate::domain::MetricsPtr> {
    Ok(Arc::new(RegistryMetrics::new(prefix)))
}
