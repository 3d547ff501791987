//! The request-timing filter.
//!
//! Per request: resolve the context path, ask the [`PathPolicy`] once, and
//! either pass straight through or time the downstream call and submit one
//! sample keyed by `(endpoint, status)`. The filter never alters what
//! downstream returns; errors and panics reach the caller unchanged after
//! the sample is taken.

use super::guard::MeasureGuard;
use super::request::{RequestInfo, ResponseStatus};
use crate::config::FilterConfig;
use crate::domain::{KeySource, MetricsPtr, PathPolicy};
use anyhow::Result;
use std::future::Future;
use std::sync::Arc;

/// Request interceptor owning the policy and the metrics registry.
///
/// Cheap to clone; clones share the same policy and registry.
#[derive(Clone)]
pub struct TimingFilter {
    policy: Arc<PathPolicy>,
    metrics: MetricsPtr,
    key_source: KeySource,
}

impl TimingFilter {
    // ---
    /// Builds the filter and starts the registry.
    ///
    /// # Errors
    /// Returns an error if the registry cannot be started.
    pub fn init(config: &FilterConfig, metrics: MetricsPtr) -> Result<Self> {
        // ---
        tracing::debug!("Running init on TimingFilter");

        let policy = config.policy();
        tracing::debug!(
            "Managing contexts {:?} in {} mode",
            policy.contexts(),
            if policy.whitelist_mode() { "whitelist" } else { "blacklist" }
        );

        metrics.start()?;

        tracing::debug!("Initialization complete");
        Ok(Self {
            policy: Arc::new(policy),
            metrics,
            key_source: KeySource::default(),
        })
    }

    pub fn with_key_source(mut self, key_source: KeySource) -> Self {
        // ---
        self.key_source = key_source;
        self
    }

    pub fn policy(&self) -> &PathPolicy {
        // ---
        &self.policy
    }

    pub fn metrics(&self) -> &MetricsPtr {
        // ---
        &self.metrics
    }

    pub fn key_source(&self) -> KeySource {
        // ---
        self.key_source
    }

    /// Whether this request is measured. Matches on the context path.
    pub fn decide(&self, request: &RequestInfo) -> bool {
        // ---
        let measured = self.policy.decide(request.context_path());
        tracing::debug!(
            "Context [{}] path [{}] matched: [{}], metrics computed: [{}]",
            request.context_path(),
            request.endpoint_path(),
            self.policy.matches(request.context_path()),
            measured
        );
        measured
    }

    fn key_endpoint(&self, request: &RequestInfo) -> String {
        // ---
        match self.key_source {
            KeySource::RequestUri => request.request_uri().to_string(),
            KeySource::EndpointPath => request.endpoint_path().to_string(),
        }
    }

    /// Starts timing a request the policy already chose to measure.
    pub(crate) fn measure(&self, request: &RequestInfo) -> MeasureGuard {
        // ---
        MeasureGuard::start(self.metrics.clone(), self.key_endpoint(request))
    }

    /// Runs `downstream`, timing it if the policy says so.
    ///
    /// On `Ok` the sample is tagged with the response status; on `Err`, or
    /// if this future is dropped before downstream finishes, it is tagged
    /// with `UNKNOWN_STATUS`. The result is returned untouched.
    pub async fn filter<Fut, T, E>(&self, request: &RequestInfo, downstream: Fut) -> Result<T, E>
    where
        Fut: Future<Output = Result<T, E>>,
        T: ResponseStatus,
    {
        // ---
        if !self.decide(request) {
            return downstream.await;
        }

        let mut guard = self.measure(request);
        let result = downstream.await;
        if let Ok(response) = &result {
            guard.set_status(response.status_code());
        }
        result
    }

    /// Blocking counterpart of [`filter`](Self::filter) for synchronous hosts.
    ///
    /// A panic in `downstream` is still measured and keeps unwinding.
    pub fn filter_blocking<F, T, E>(&self, request: &RequestInfo, downstream: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
        T: ResponseStatus,
    {
        // ---
        if !self.decide(request) {
            return downstream();
        }

        let mut guard = self.measure(request);
        let result = downstream();
        if let Ok(response) = &result {
            guard.set_status(response.status_code());
        }
        result
    }

    /// Stops the registry and releases its exposure resources.
    ///
    /// Safe to call more than once; later calls do nothing.
    pub fn destroy(&self) -> Result<()> {
        // ---
        tracing::trace!("Closing the registry");
        self.metrics.stop()
    }
}
