use crate::domain::MetricKey;
use metrics::{counter, histogram};

/// Summary of request durations in milliseconds.
pub const REQUEST_DURATION_MILLISECONDS: &str = "http_request_duration_milliseconds";

/// Count of measured requests.
pub const REQUESTS_TOTAL: &str = "http_requests_total";

/// Track one measured request, labelled by endpoint and response code.
///
/// Must run under the backend's local recorder.
pub fn track_http_request(prefix: &str, key: &MetricKey, duration_millis: u64) {
    let labels = [
        ("source", prefix.to_string()),
        ("endpoint", key.endpoint.clone()),
        ("response_code", key.status.to_string()),
    ];

    counter!(REQUESTS_TOTAL, &labels).increment(1);
    histogram!(REQUEST_DURATION_MILLISECONDS, &labels).record(duration_millis as f64);
}
