//! Lock-free timer used as the per-key aggregate.
//!
//! Recording is O(1) with no locks or allocations: a handful of relaxed
//! atomic updates plus one release increment on `count`. Quantiles are
//! approximated from log2 buckets at snapshot time.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

const BUCKETS: usize = 64;

/// Running duration statistics in milliseconds.
#[derive(Debug)]
pub struct Timer {
    buckets: [AtomicU64; BUCKETS],
    count: AtomicU64,
    sum: AtomicU64,
    min: AtomicU64,
    max: AtomicU64,
}

/// Point-in-time view of a [`Timer`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimerSnapshot {
    pub count: u64,
    pub sum: u64,
    pub min: u64,
    pub max: u64,
    pub mean: f64,
    pub p50: u64,
    pub p75: u64,
    pub p95: u64,
    pub p99: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    // ---
    pub fn new() -> Self {
        // ---
        Self {
            buckets: std::array::from_fn(|_| AtomicU64::new(0)),
            count: AtomicU64::new(0),
            sum: AtomicU64::new(0),
            min: AtomicU64::new(u64::MAX),
            max: AtomicU64::new(0),
        }
    }

    /// Records one duration sample. Safe to call from any number of threads.
    #[inline]
    pub fn record(&self, millis: u64) {
        // ---
        self.sum.fetch_add(millis, Ordering::Relaxed);
        self.min.fetch_min(millis, Ordering::Relaxed);
        self.max.fetch_max(millis, Ordering::Relaxed);
        self.buckets[bucket_index(millis)].fetch_add(1, Ordering::Relaxed);
        // Release on count pairs with the Acquire load in snapshot().
        self.count.fetch_add(1, Ordering::Release);
    }

    pub fn count(&self) -> u64 {
        // ---
        self.count.load(Ordering::Acquire)
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        // ---
        let count = self.count.load(Ordering::Acquire);
        if count == 0 {
            return TimerSnapshot::default();
        }

        let buckets: [u64; BUCKETS] =
            std::array::from_fn(|i| self.buckets[i].load(Ordering::Relaxed));
        let sum = self.sum.load(Ordering::Relaxed);
        let max = self.max.load(Ordering::Relaxed);
        // A concurrent record may have bumped min before max.
        let min = self.min.load(Ordering::Relaxed).min(max);

        let quantile = |num, den| estimate_quantile(&buckets, count, num, den, min, max);

        TimerSnapshot {
            count,
            sum,
            min,
            max,
            mean: sum as f64 / count as f64,
            p50: quantile(1, 2),
            p75: quantile(3, 4),
            p95: quantile(19, 20),
            p99: quantile(99, 100),
        }
    }
}

/// floor(log2(value)), with 0 sharing bucket 0 with 1.
#[inline]
const fn bucket_index(value: u64) -> usize {
    if value == 0 {
        return 0;
    }
    63 - value.leading_zeros() as usize
}

const fn bucket_upper_bound(idx: usize) -> u64 {
    if idx >= 63 {
        return u64::MAX;
    }
    (1u64 << (idx + 1)) - 1
}

/// Nearest-rank quantile `num/den`, answered with the upper bound of the
/// bucket holding that rank and clamped to the observed range.
fn estimate_quantile(
    buckets: &[u64; BUCKETS],
    count: u64,
    num: u64,
    den: u64,
    min: u64,
    max: u64,
) -> u64 {
    // ---
    let rank = (count.saturating_mul(num).saturating_add(den - 1) / den).clamp(1, count);

    let mut cumulative = 0u64;
    for (idx, hits) in buckets.iter().copied().enumerate() {
        cumulative = cumulative.saturating_add(hits);
        if cumulative >= rank {
            return bucket_upper_bound(idx).clamp(min, max);
        }
    }
    max
}
