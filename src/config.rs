// src/config.rs

//! Filter and application configuration.
//!
//! Filter configuration arrives as key/value pairs (`contexts`, `whitelist`)
//! from whatever source the host has: a map, environment variables, a
//! config file section. Parsing it never fails; bad or missing values fall
//! back to defaults and are logged.

use crate::domain::{KeySource, PathPolicy, DEFAULT_NAME_PREFIX};
use std::collections::HashMap;

// ============================================================
// Local macros (config-only, intentionally explicit)
// ============================================================

/// Reads an optional environment variable and attempts to parse it.
///
/// If the variable is missing or cannot be parsed, the provided
/// default value is used. This macro is appropriate for non-critical
/// tuning parameters where fallback behavior is acceptable.
macro_rules! optional_env_parse {
    // ---
    ($key:literal, $ty:ty, $default:expr) => {
        std::env::var($key)
            .ok()
            .and_then(|v| v.parse::<$ty>().ok())
            .unwrap_or($default)
    };
}

/// Reads an optional environment variable as a string with a default.
macro_rules! optional_env {
    // ---
    ($key:literal, $default:expr) => {
        std::env::var($key).unwrap_or_else(|_| $default.to_string())
    };
}

// ============================================================
// Filter configuration
// ============================================================

/// Key holding the comma-separated list of managed contexts.
pub const CONTEXTS_KEY: &str = "contexts";

/// Key holding the whitelist/blacklist flag.
pub const WHITELIST_KEY: &str = "whitelist";

/// Timing filter configuration: which contexts and in which polarity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterConfig {
    /// Context paths, trimmed, in configured order.
    pub contexts: Vec<String>,

    /// `true` measures only `contexts`; `false` measures everything else.
    pub whitelist: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        // ---
        Self {
            contexts: Vec::new(),
            whitelist: true,
        }
    }
}

impl FilterConfig {
    // ---
    /// Builds the configuration from a key/value lookup.
    ///
    /// Absent keys keep their defaults (no contexts, whitelist mode).
    pub fn from_params<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        // ---
        tracing::trace!("Loading timing filter configuration");
        let mut config = Self::default();

        if let Some(raw) = lookup(WHITELIST_KEY) {
            config.whitelist = parse_whitelist(&raw);
            tracing::debug!(
                "Loaded [{}] value for parameter [{}]",
                config.whitelist,
                WHITELIST_KEY
            );
        }

        if let Some(raw) = lookup(CONTEXTS_KEY) {
            config.contexts = parse_contexts(&raw);
            tracing::debug!("Loaded [{}] value for parameter [{}]", raw, CONTEXTS_KEY);
        }

        config
    }

    pub fn from_map(params: &HashMap<String, String>) -> Self {
        // ---
        Self::from_params(|key| params.get(key).cloned())
    }

    /// Reads `TIMING_FILTER_CONTEXTS` and `TIMING_FILTER_WHITELIST`.
    pub fn from_env() -> Self {
        // ---
        Self::from_params(|key| std::env::var(format!("TIMING_FILTER_{}", key.to_uppercase())).ok())
    }

    pub fn policy(&self) -> PathPolicy {
        // ---
        PathPolicy::new(self.contexts.clone(), self.whitelist)
    }
}

/// Splits on `,` and trims each entry. Blank input yields no contexts.
pub fn parse_contexts(raw: &str) -> Vec<String> {
    // ---
    if raw.trim().is_empty() {
        return Vec::new();
    }
    tracing::trace!("Splitting and trimming managed paths");
    raw.split(',').map(|path| path.trim().to_string()).collect()
}

/// Strict `true`/`false`; anything else falls back to whitelist mode.
pub fn parse_whitelist(raw: &str) -> bool {
    // ---
    raw.parse::<bool>().unwrap_or_else(|_| {
        tracing::warn!(
            "Unparseable [{}] value [{}], defaulting to true",
            WHITELIST_KEY,
            raw
        );
        true
    })
}

// ============================================================
// Application configuration
// ============================================================

/// Metrics backend selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MetricsBackend {
    /// In-process registry with per-metric lookup.
    #[default]
    Registry,

    /// Prometheus exposition via `metrics-exporter-prometheus`.
    Prometheus,

    /// Discards everything.
    Noop,
}

impl MetricsBackend {
    // ---
    pub fn parse(value: &str) -> Option<Self> {
        // ---
        match value {
            "registry" => Some(MetricsBackend::Registry),
            "prom" => Some(MetricsBackend::Prometheus),
            "noop" => Some(MetricsBackend::Noop),
            _ => None,
        }
    }
}

/// Aggregated application configuration for the bundled server.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Listen address. Defaults to `127.0.0.1:8080`.
    pub bind_addr: String,

    /// Metrics backend. Defaults to the in-process registry.
    pub backend: MetricsBackend,

    /// Identifying prefix of published metric names.
    pub prefix: String,

    /// Whether keys use the full URI or the context-stripped path.
    pub key_source: KeySource,

    pub filter: FilterConfig,
}

impl AppConfig {
    /// Loads application configuration from the environment.
    ///
    /// Never fails: every setting has a default, and unknown values are
    /// reported and replaced by it.
    pub fn from_env() -> Self {
        // ---
        let bind_addr = optional_env!("TIMING_BIND_ADDR", "127.0.0.1:8080");
        let prefix = optional_env!("TIMING_METRIC_PREFIX", DEFAULT_NAME_PREFIX);

        let backend_raw = optional_env!("TIMING_METRICS_TYPE", "registry");
        let backend = MetricsBackend::parse(&backend_raw).unwrap_or_else(|| {
            tracing::warn!("Unknown metrics type [{}], using registry", backend_raw);
            MetricsBackend::default()
        });

        let key_source_raw = optional_env!("TIMING_KEY_SOURCE", "uri");
        let key_source = KeySource::parse(&key_source_raw).unwrap_or_else(|| {
            tracing::warn!("Unknown key source [{}], using uri", key_source_raw);
            KeySource::default()
        });

        Self {
            bind_addr,
            backend,
            prefix,
            key_source,
            filter: FilterConfig::from_env(),
        }
    }

    /// Seconds to wait for in-flight requests on shutdown. Defaults to 10.
    pub fn shutdown_grace_secs() -> u64 {
        optional_env_parse!("TIMING_SHUTDOWN_GRACE_SEC", u64, 10)
    }
}

// ============================================================
// Tests
// ============================================================

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use serial_test::serial;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        // ---
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn empty_params_use_defaults() {
        // ---
        let cfg = FilterConfig::from_map(&HashMap::new());

        assert!(cfg.contexts.is_empty());
        assert!(cfg.whitelist);
        assert_eq!(cfg, FilterConfig::default());
    }

    #[test]
    fn contexts_are_split_and_trimmed_in_order() {
        // ---
        let cfg = FilterConfig::from_map(&params(&[("contexts", "/a, /b ,/c")]));
        assert_eq!(cfg.contexts, vec!["/a", "/b", "/c"]);
    }

    #[test]
    fn full_config_is_loaded() {
        // ---
        let cfg = FilterConfig::from_map(&params(&[
            ("contexts", "/myApp, /test-context-2"),
            ("whitelist", "false"),
        ]));

        assert_eq!(cfg.contexts, vec!["/myApp", "/test-context-2"]);
        assert!(!cfg.whitelist);
    }

    #[test]
    fn blank_contexts_yield_empty_list() {
        // ---
        assert!(parse_contexts("").is_empty());
        assert!(parse_contexts("   ").is_empty());
    }

    #[test]
    fn interior_empty_entries_are_kept() {
        // ---
        assert_eq!(parse_contexts("/a,,/b"), vec!["/a", "", "/b"]);
    }

    #[test]
    fn whitelist_parsing_is_strict_and_never_fails() {
        // ---
        assert!(parse_whitelist("true"));
        assert!(!parse_whitelist("false"));

        // Malformed values fall back to whitelist mode.
        assert!(parse_whitelist("FALSE"));
        assert!(parse_whitelist("no"));
        assert!(parse_whitelist(""));
    }

    #[test]
    fn policy_reflects_config() {
        // ---
        let cfg = FilterConfig::from_map(&params(&[("contexts", "/myApp"), ("whitelist", "false")]));
        let policy = cfg.policy();

        assert_eq!(policy.contexts(), ["/myApp".to_string()]);
        assert!(!policy.whitelist_mode());
    }

    #[test]
    fn metrics_backend_spellings() {
        // ---
        assert_eq!(MetricsBackend::parse("registry"), Some(MetricsBackend::Registry));
        assert_eq!(MetricsBackend::parse("prom"), Some(MetricsBackend::Prometheus));
        assert_eq!(MetricsBackend::parse("noop"), Some(MetricsBackend::Noop));
        assert_eq!(MetricsBackend::parse("jmx"), None);
    }

    fn clear_env() {
        // ---
        for key in [
            "TIMING_BIND_ADDR",
            "TIMING_METRICS_TYPE",
            "TIMING_METRIC_PREFIX",
            "TIMING_KEY_SOURCE",
            "TIMING_FILTER_CONTEXTS",
            "TIMING_FILTER_WHITELIST",
            "TIMING_SHUTDOWN_GRACE_SEC",
        ] {
            std::env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn app_defaults_applied() {
        // ---
        clear_env();

        let cfg = AppConfig::from_env();
        assert_eq!(cfg.bind_addr, "127.0.0.1:8080");
        assert_eq!(cfg.backend, MetricsBackend::Registry);
        assert_eq!(cfg.prefix, DEFAULT_NAME_PREFIX);
        assert_eq!(cfg.key_source, KeySource::RequestUri);
        assert_eq!(cfg.filter, FilterConfig::default());
        assert_eq!(AppConfig::shutdown_grace_secs(), 10);
    }

    #[test]
    #[serial]
    fn app_overrides_defaults() {
        // ---
        clear_env();
        std::env::set_var("TIMING_BIND_ADDR", "0.0.0.0:9000");
        std::env::set_var("TIMING_METRICS_TYPE", "prom");
        std::env::set_var("TIMING_METRIC_PREFIX", "metrics");
        std::env::set_var("TIMING_KEY_SOURCE", "endpoint");
        std::env::set_var("TIMING_FILTER_CONTEXTS", "/myApp , /admin");
        std::env::set_var("TIMING_FILTER_WHITELIST", "false");
        std::env::set_var("TIMING_SHUTDOWN_GRACE_SEC", "3");

        let cfg = AppConfig::from_env();
        assert_eq!(cfg.bind_addr, "0.0.0.0:9000");
        assert_eq!(cfg.backend, MetricsBackend::Prometheus);
        assert_eq!(cfg.prefix, "metrics");
        assert_eq!(cfg.key_source, KeySource::EndpointPath);
        assert_eq!(cfg.filter.contexts, vec!["/myApp", "/admin"]);
        assert!(!cfg.filter.whitelist);
        assert_eq!(AppConfig::shutdown_grace_secs(), 3);

        clear_env();
    }

    #[test]
    #[serial]
    fn unknown_env_values_fall_back() {
        // ---
        clear_env();
        std::env::set_var("TIMING_METRICS_TYPE", "jmx");
        std::env::set_var("TIMING_KEY_SOURCE", "path");
        std::env::set_var("TIMING_FILTER_WHITELIST", "nope");
        std::env::set_var("TIMING_SHUTDOWN_GRACE_SEC", "soon");

        let cfg = AppConfig::from_env();
        assert_eq!(cfg.backend, MetricsBackend::Registry);
        assert_eq!(cfg.key_source, KeySource::RequestUri);
        assert!(cfg.filter.whitelist);
        assert_eq!(AppConfig::shutdown_grace_secs(), 10);

        clear_env();
    }
}
