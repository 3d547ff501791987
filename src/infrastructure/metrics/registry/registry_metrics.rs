//! In-process metrics registry with per-metric introspection.
//!
//! Each `(endpoint, status)` key owns one [`Timer`] stored in a sharded
//! `DashMap` under its published name. Concurrent requests hitting
//! different keys contend only on their shard; requests hitting the same
//! key update the timer's atomics without taking a write lock.

use crate::domain::{MetricKey, Metrics, Timer, TimerSnapshot};
use crate::infrastructure::metrics::lifecycle::Lifecycle;
use anyhow::Result;
use dashmap::DashMap;
use std::fmt::Write;

const BACKEND: &str = "registry";

/// Registry backend that keeps every aggregate queryable by name.
pub struct RegistryMetrics {
    prefix: String,
    timers: DashMap<String, Timer>,
    lifecycle: Lifecycle,
}

impl RegistryMetrics {
    // ---
    pub fn new(prefix: impl Into<String>) -> Self {
        // ---
        let prefix = prefix.into();
        tracing::info!("Creating registry metrics with prefix [{}]", prefix);
        RegistryMetrics {
            prefix,
            timers: DashMap::new(),
            lifecycle: Lifecycle::new(),
        }
    }

    pub fn prefix(&self) -> &str {
        // ---
        &self.prefix
    }
}

impl Metrics for RegistryMetrics {
    // ---
    fn start(&self) -> Result<()> {
        self.lifecycle.start(BACKEND)
    }

    fn stop(&self) -> Result<()> {
        // ---
        if self.lifecycle.stop(BACKEND) {
            // Unpublish every aggregate.
            self.timers.clear();
        }
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.lifecycle.is_closed()
    }

    fn record(&self, key: &MetricKey, duration_millis: u64) {
        // ---
        if self.lifecycle.is_closed() {
            tracing::trace!("Registry closed, dropping sample for [{}]", key);
            return;
        }

        let name = key.metric_name(&self.prefix);
        tracing::debug!("Recording {} ms under [{}]", duration_millis, name);

        // Fast path takes only a shard read lock.
        if let Some(timer) = self.timers.get(&name) {
            timer.record(duration_millis);
            return;
        }
        self.timers
            .entry(name.clone())
            .or_default()
            .record(duration_millis);

        // A concurrent stop may have cleared the map before this insert.
        // Its state flip is visible by now, so the late key is withdrawn.
        if self.lifecycle.is_closed() {
            self.timers.remove(&name);
        }
    }

    fn render(&self) -> String {
        // ---
        let mut out = String::new();
        for name in self.names() {
            let Some(s) = self.snapshot(&name) else {
                continue;
            };
            let _ = writeln!(
                out,
                "{name} count={} min={} max={} mean={:.3} p50={} p75={} p95={} p99={}",
                s.count, s.min, s.max, s.mean, s.p50, s.p75, s.p95, s.p99
            );
        }
        out
    }

    fn snapshot(&self, name: &str) -> Option<TimerSnapshot> {
        self.timers.get(name).map(|timer| timer.snapshot())
    }

    fn names(&self) -> Vec<String> {
        // ---
        let mut names: Vec<String> = self.timers.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }
}
