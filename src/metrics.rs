//! Process-local engine metrics with snapshot/reset semantics.
//!
//! Complements the `metrics` facade (see [`telemetry`](crate::telemetry)):
//! the facade exports to whatever recorder the host installs, while
//! [`EngineMetrics`] is the engine-owned, queryable state behind admin and
//! debug endpoints. Counters are atomics; cost is accumulated in integer
//! microdollars so it needs no lock. Counters reset only via [`reset`],
//! are per-process, and are not aggregated across instances.
//!
//! [`reset`]: EngineMetrics::reset

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::types::Tier;

const MICROS_PER_DOLLAR: f64 = 1_000_000.0;

/// Thread-safe counters for one engine instance.
#[derive(Debug, Default)]
pub struct EngineMetrics {
    requests: AtomicU64,
    cost_micros: AtomicU64,
    tier_calls: [AtomicU64; 3],
    tier_errors: [AtomicU64; 3],
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
}

impl EngineMetrics {
    /// Fresh zeroed collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one incoming execute request.
    pub fn record_request(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Count a successful provider call on `tier` costing `cost` USD.
    pub fn record_success(&self, tier: Tier, cost: f64) {
        self.tier_calls[tier.index()].fetch_add(1, Ordering::Relaxed);
        let micros = (cost * MICROS_PER_DOLLAR).round() as u64;
        self.cost_micros.fetch_add(micros, Ordering::Relaxed);
    }

    /// Count a failed provider call on `tier`.
    pub fn record_error(&self, tier: Tier) {
        self.tier_errors[tier.index()].fetch_add(1, Ordering::Relaxed);
    }

    /// Count a cache hit.
    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Count a cache miss.
    pub fn record_cache_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Consistent-enough point-in-time view of all counters.
    ///
    /// Individual loads are relaxed; under concurrent writes the snapshot
    /// may straddle an update, which is acceptable for observability data.
    pub fn snapshot(&self) -> MetricsSnapshot {
        let tier = |counters: &[AtomicU64; 3]| TierCounts {
            simple: counters[Tier::Simple.index()].load(Ordering::Relaxed),
            medium: counters[Tier::Medium.index()].load(Ordering::Relaxed),
            complex: counters[Tier::Complex.index()].load(Ordering::Relaxed),
        };
        let hits = self.cache_hits.load(Ordering::Relaxed);
        let misses = self.cache_misses.load(Ordering::Relaxed);
        MetricsSnapshot {
            requests: self.requests.load(Ordering::Relaxed),
            total_cost: self.cost_micros.load(Ordering::Relaxed) as f64 / MICROS_PER_DOLLAR,
            tier_calls: tier(&self.tier_calls),
            tier_errors: tier(&self.tier_errors),
            cache_hits: hits,
            cache_misses: misses,
        }
    }

    /// Zero every counter. The only reset there is.
    pub fn reset(&self) {
        self.requests.store(0, Ordering::Relaxed);
        self.cost_micros.store(0, Ordering::Relaxed);
        for counter in &self.tier_calls {
            counter.store(0, Ordering::Relaxed);
        }
        for counter in &self.tier_errors {
            counter.store(0, Ordering::Relaxed);
        }
        self.cache_hits.store(0, Ordering::Relaxed);
        self.cache_misses.store(0, Ordering::Relaxed);
    }
}

/// Per-tier counter values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TierCounts {
    pub simple: u64,
    pub medium: u64,
    pub complex: u64,
}

impl TierCounts {
    /// Value for one tier.
    pub fn for_tier(&self, tier: Tier) -> u64 {
        match tier {
            Tier::Simple => self.simple,
            Tier::Medium => self.medium,
            Tier::Complex => self.complex,
        }
    }

    /// Sum across tiers.
    pub fn total(&self) -> u64 {
        self.simple + self.medium + self.complex
    }
}

/// Read-only view of an engine's counters.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub requests: u64,
    /// Accumulated provider cost in USD.
    pub total_cost: f64,
    pub tier_calls: TierCounts,
    pub tier_errors: TierCounts,
    pub cache_hits: u64,
    pub cache_misses: u64,
}

impl MetricsSnapshot {
    /// Cache hit rate in [0.0, 1.0]; 0.0 before any lookups.
    pub fn cache_hit_rate(&self) -> f64 {
        let lookups = self.cache_hits + self.cache_misses;
        if lookups == 0 {
            0.0
        } else {
            self.cache_hits as f64 / lookups as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate() {
        let metrics = EngineMetrics::new();
        metrics.record_request();
        metrics.record_request();
        metrics.record_success(Tier::Medium, 0.015);
        metrics.record_error(Tier::Complex);
        metrics.record_cache_hit();
        metrics.record_cache_miss();

        let snap = metrics.snapshot();
        assert_eq!(snap.requests, 2);
        assert_eq!(snap.tier_calls.for_tier(Tier::Medium), 1);
        assert_eq!(snap.tier_errors.for_tier(Tier::Complex), 1);
        assert!((snap.total_cost - 0.015).abs() < 1e-9);
        assert!((snap.cache_hit_rate() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn hit_rate_without_lookups_is_zero() {
        assert_eq!(EngineMetrics::new().snapshot().cache_hit_rate(), 0.0);
    }

    #[test]
    fn reset_zeroes_everything() {
        let metrics = EngineMetrics::new();
        metrics.record_request();
        metrics.record_success(Tier::Simple, 1.25);
        metrics.record_cache_hit();
        metrics.reset();

        let snap = metrics.snapshot();
        assert_eq!(snap.requests, 0);
        assert_eq!(snap.total_cost, 0.0);
        assert_eq!(snap.tier_calls.total(), 0);
        assert_eq!(snap.cache_hits, 0);
    }

    #[test]
    fn cost_survives_microdollar_rounding() {
        let metrics = EngineMetrics::new();
        for _ in 0..1000 {
            metrics.record_success(Tier::Simple, 0.000_3);
        }
        let total = metrics.snapshot().total_cost;
        assert!((total - 0.3).abs() < 1e-6);
    }
}
