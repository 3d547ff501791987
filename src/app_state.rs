//! Application state management.
//!
//! This module defines the shared state structure that gets passed to all
//! Axum handlers via the `State` extractor. The `AppState` holds the timing
//! filter, and through it the metrics registry the management handlers
//! expose.
//!
//! The state is cheaply cloneable (the filter is `Arc`-backed) so it can be
//! handed to each request without copying the registry.

use crate::domain::MetricsPtr;
use crate::filter::TimingFilter;

/// Shared application state passed to all Axum handlers.
///
/// # Lifecycle
///
/// 1. Created once in `create_router()` from an initialized `TimingFilter`
/// 2. Attached to the Axum router via `.with_state(app_state)`
/// 3. Cloned automatically by Axum for each incoming HTTP request
/// 4. Handlers extract via `State(state): State<AppState>`
///
/// The same filter instance drives the timing middleware, so handlers
/// always read the registry the middleware writes to.
#[derive(Clone)]
pub(crate) struct AppState {
    /// Timing filter owning the policy and the metrics registry.
    filter: TimingFilter,
}

impl AppState {
    // ---

    pub fn new(filter: TimingFilter) -> Self {
        // ---
        AppState { filter }
    }

    /// Get a reference to the metrics implementation.
    pub(crate) fn metrics(&self) -> &MetricsPtr {
        // ---
        self.filter.metrics()
    }

    /// Get a reference to the timing filter.
    pub(crate) fn filter(&self) -> &TimingFilter {
        // ---
        &self.filter
    }
}

#[cfg(test)]
mod tests {
    // ---

    use super::*;
    use crate::config::FilterConfig;
    use crate::infrastructure::create_noop_metrics;
    use anyhow::Result;

    #[test]
    fn test_app_state_creation_and_clone() -> Result<()> {
        // ---
        let filter = TimingFilter::init(&FilterConfig::default(), create_noop_metrics()?)?;

        let app_state = AppState::new(filter);
        let cloned = app_state.clone();

        // Clones share one registry.
        assert!(std::sync::Arc::ptr_eq(app_state.metrics(), cloned.metrics()));
        assert!(app_state.filter().policy().whitelist_mode());
        Ok(())
    }
}
