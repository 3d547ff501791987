//! Prometheus metrics implementation.
//!
//! This module provides a concrete implementation of the `Metrics` trait using
//! the Prometheus metrics format. It delegates to utility functions in sibling
//! modules (`counters.rs`, `recorder.rs`) which handle the actual metrics
//! collection via the `metrics` crate macros.
//!
//! Unlike a process-wide recorder, each instance owns its recorder and enters
//! it with `metrics::with_local_recorder` for every sample. The registry's
//! lifetime is therefore the lifetime of the filter that owns it.

use crate::domain::{MetricKey, Metrics};
use crate::infrastructure::metrics::lifecycle::Lifecycle;
use anyhow::Result;
use metrics_exporter_prometheus::{PrometheusHandle, PrometheusRecorder};

const BACKEND: &str = "prometheus";

/// Prometheus-based metrics implementation.
///
/// Endpoint and status travel as labels, since Prometheus metric names
/// cannot carry arbitrary paths. The identifying prefix becomes the
/// `source` label.
pub struct PrometheusMetrics {
    prefix: String,
    recorder: PrometheusRecorder,
    handle: PrometheusHandle,
    lifecycle: Lifecycle,
}

impl PrometheusMetrics {
    pub fn new(prefix: impl Into<String>) -> Self {
        tracing::info!("Creating Prometheus metrics");
        let (recorder, handle) = super::init_metrics();
        PrometheusMetrics {
            prefix: prefix.into(),
            recorder,
            handle,
            lifecycle: Lifecycle::new(),
        }
    }
}

impl Metrics for PrometheusMetrics {
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

    fn record(&self, key: &MetricKey, duration_millis: u64) {
        if self.lifecycle.is_closed() {
            tracing::trace!("Prometheus registry closed, dropping sample for [{}]", key);
            return;
        }

        tracing::debug!("Recording HTTP request duration for [{}]", key);
        metrics::with_local_recorder(&self.recorder, || {
            super::track_http_request(&self.prefix, key, duration_millis);
        });
    }

    fn render(&self) -> String {
        // Stopped registries publish nothing.
        if self.lifecycle.is_closed() {
            return String::new();
        }
        super::render_metrics(&self.handle)
    }
}
