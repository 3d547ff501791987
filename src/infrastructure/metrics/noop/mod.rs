// src/infrastructure/metrics/noop/mod.rs
mod noop_metrics;

pub use noop_metrics::NoopMetrics;
use std::sync::Arc;

/// Creates a new no-op metrics implementation.
///
/// This implementation does nothing - all metrics calls are ignored.
/// Useful for development, testing, or when metrics are disabled.
///
/// Returns a metrics instance that still has to be started.
pub fn create() -> anyhow::Result<crate::domain::MetricsPtr> {
    Ok(Arc::new(NoopMetrics::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MetricKey;

    #[test]
    fn noop_discards_samples_but_tracks_lifecycle() -> anyhow::Result<()> {
        // ---
        let metrics = create()?;
        metrics.start()?;
        metrics.record(&MetricKey::new("/a", 200), 5);

        assert!(metrics.render().is_empty());
        assert!(metrics.names().is_empty());
        assert!(metrics.snapshot("anything").is_none());

        metrics.stop()?;
        assert!(metrics.is_closed());
        Ok(())
    }
}
