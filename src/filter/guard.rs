use crate::domain::{MetricKey, MetricsPtr, UNKNOWN_STATUS};
use std::time::Instant;

/// Records exactly one sample when dropped.
///
/// Created before downstream runs, so the sample is taken on every exit:
/// normal return, error, panic unwinding, or the request future being
/// dropped mid-flight. Until [`set_status`](Self::set_status) is called the
/// sample carries [`UNKNOWN_STATUS`].
///
/// The guard owns its registry handle, so it can ride inside a response
/// body and keep timing until the body is fully written.
pub(crate) struct MeasureGuard {
    metrics: MetricsPtr,
    endpoint: String,
    status: u16,
    start: Instant,
}

impl MeasureGuard {
    // ---
    pub fn start(metrics: MetricsPtr, endpoint: String) -> Self {
        // ---
        Self {
            metrics,
            endpoint,
            status: UNKNOWN_STATUS,
            start: Instant::now(),
        }
    }

    pub fn set_status(&mut self, status: u16) {
        self.status = status;
    }
}

impl Drop for MeasureGuard {
    fn drop(&mut self) {
        // ---
        // Instant is monotonic, so elapsed never goes negative.
        let elapsed = u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX);
        let key = MetricKey::new(std::mem::take(&mut self.endpoint), self.status);
        tracing::debug!("Request [{}] took {} ms", key, elapsed);
        self.metrics.record(&key, elapsed);
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::domain::Metrics;
    use crate::infrastructure::metrics::registry::RegistryMetrics;
    use anyhow::Result;
    use std::sync::Arc;

    fn started() -> Result<Arc<RegistryMetrics>> {
        // ---
        let registry = Arc::new(RegistryMetrics::new("m"));
        registry.start()?;
        Ok(registry)
    }

    #[test]
    fn records_once_on_drop_with_unknown_status() -> Result<()> {
        // ---
        let registry = started()?;

        drop(MeasureGuard::start(registry.clone(), "/a".to_string()));

        assert_eq!(registry.names(), vec!["m./a.responseCode.0"]);
        assert_eq!(registry.snapshot("m./a.responseCode.0").map(|s| s.count), Some(1));
        Ok(())
    }

    #[test]
    fn status_set_before_drop_is_used() -> Result<()> {
        // ---
        let registry = started()?;

        {
            let mut guard = MeasureGuard::start(registry.clone(), "/a".to_string());
            guard.set_status(201);
        }

        assert_eq!(registry.names(), vec!["m./a.responseCode.201"]);
        Ok(())
    }

    #[test]
    fn records_during_panic_unwind() -> Result<()> {
        // ---
        let registry = started()?;

        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = MeasureGuard::start(registry.clone(), "/boom".to_string());
            panic!("downstream blew up");
        }));

        assert!(outcome.is_err());
        assert_eq!(registry.names(), vec!["m./boom.responseCode.0"]);
        Ok(())
    }
}
