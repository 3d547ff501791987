use crate::domain::{MetricKey, Metrics};
use crate::infrastructure::metrics::lifecycle::Lifecycle;
use anyhow::Result;

const BACKEND: &str = "noop";

/// No-op metrics implementation for testing.
///
/// Samples are discarded, but the start/stop lifecycle is still tracked so
/// the filter behaves the same regardless of backend.
pub struct NoopMetrics {
    lifecycle: Lifecycle,
}

impl NoopMetrics {
    pub fn new() -> Self {
        NoopMetrics {
            lifecycle: Lifecycle::new(),
        }
    }
}

impl Default for NoopMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics for NoopMetrics {
    // ---
    fn start(&self) -> Result<()> {
        self.lifecycle.start(BACKEND)
    }
    fn stop(&self) -> Result<()> {
        self.lifecycle.stop(BACKEND);
        Ok(())
    }
    fn is_closed(&self) -> bool {
        self.lifecycle.is_closed()
    }
    fn record(&self, _: &MetricKey, _: u64) {}
    fn render(&self) -> String {
        String::new()
    }
}
