mod metric_key;
mod metrics;
mod policy;
mod timer;

// Publicly expose the Metrics abstraction
pub use metrics::{Metrics, MetricsPtr};

// Publicly expose the measurement building blocks
pub use metric_key::{KeySource, MetricKey, DEFAULT_NAME_PREFIX, UNKNOWN_STATUS};
pub use policy::PathPolicy;
pub use timer::{Timer, TimerSnapshot};
