use super::{MetricKey, TimerSnapshot};
use anyhow::Result;
use std::sync::Arc;

/// Abstraction over the registry that aggregates and exposes request timings.
///
/// The timing filter depends only on this capability; which backend sits
/// behind it is decided once at startup.
pub trait Metrics: Send + Sync + 'static {
    // ---
    /// Begin exposing the registry. Called once during filter init.
    fn start(&self) -> Result<()>;

    /// Stop exposing the registry and release its resources.
    ///
    /// Calling this on an already stopped registry is a no-op.
    fn stop(&self) -> Result<()>;

    /// Whether `stop` has run.
    fn is_closed(&self) -> bool;

    /// Record one duration sample for `key`.
    fn record(&self, key: &MetricKey, duration_millis: u64);

    /// Render current metrics as text for the management endpoint.
    fn render(&self) -> String;

    /// Look up the aggregate published under `name`.
    ///
    /// Backends without per-metric introspection return `None`.
    fn snapshot(&self, _name: &str) -> Option<TimerSnapshot> {
        None
    }

    /// Names of all published aggregates.
    fn names(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Type alias for any backend that implements Metrics.
pub type MetricsPtr = Arc<dyn Metrics>;
