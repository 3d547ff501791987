mod lifecycle;
pub mod noop;
pub mod prometheus;
pub mod registry;

use crate::config::MetricsBackend;
use crate::domain::MetricsPtr;

// Re-export the factory functions for easy access
pub use noop::create as create_noop_metrics;
pub use prometheus::create as create_prom_metrics;
pub use registry::create as create_registry_metrics;

/// Creates the backend selected by configuration.
pub fn create_metrics(backend: MetricsBackend, prefix: &str) -> anyhow::Result<MetricsPtr> {
    // ---
    match backend {
        MetricsBackend::Registry => create_registry_metrics(prefix),
        MetricsBackend::Prometheus => create_prom_metrics(prefix),
        MetricsBackend::Noop => create_noop_metrics(),
    }
}
