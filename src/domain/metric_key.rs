use std::fmt;

/// Status recorded when downstream produced no response (error, panic or
/// cancellation before a response existed).
pub const UNKNOWN_STATUS: u16 = 0;

/// Default identifying prefix of published metric names.
pub const DEFAULT_NAME_PREFIX: &str = "axum_timing_filter.TimingFilter";

/// Which part of the request URI identifies the endpoint in a metric key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeySource {
    /// Full request URI path, context segment included.
    #[default]
    RequestUri,

    /// Request path with the context segment removed.
    EndpointPath,
}

impl KeySource {
    // ---
    /// Parses the config spelling (`uri` / `endpoint`).
    pub fn parse(value: &str) -> Option<Self> {
        // ---
        match value {
            "uri" => Some(KeySource::RequestUri),
            "endpoint" => Some(KeySource::EndpointPath),
            _ => None,
        }
    }
}

/// Composite identity `(endpoint, status)` of one aggregate in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MetricKey {
    pub endpoint: String,
    pub status: u16,
}

impl MetricKey {
    // ---
    pub fn new(endpoint: impl Into<String>, status: u16) -> Self {
        // ---
        Self {
            endpoint: endpoint.into(),
            status,
        }
    }

    /// Published name: `{prefix}.{endpoint}.responseCode.{status}`.
    ///
    /// External tools look metrics up by this name, so the format is fixed.
    pub fn metric_name(&self, prefix: &str) -> String {
        // ---
        format!("{prefix}.{self}")
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.responseCode.{}", self.endpoint, self.status)
    }
}
