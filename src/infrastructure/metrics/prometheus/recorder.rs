use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle, PrometheusRecorder};

/// Build a Prometheus recorder owned by one backend instance.
///
/// The recorder is never installed globally, so several filters (or tests)
/// can each hold their own registry.
pub fn init_metrics() -> (PrometheusRecorder, PrometheusHandle) {
    let recorder = PrometheusBuilder::new().build_recorder();
    let handle = recorder.handle();
    (recorder, handle)
}

/// Render the current metrics in Prometheus text format.
pub fn render_metrics(handle: &PrometheusHandle) -> String {
    handle.render()
}
