//! Content-fingerprint response cache with TTL eviction.
//!
//! Entries are keyed by a SHA-256 fingerprint of (operation, content
//! digest, options, plan, part) and live for a fixed TTL (default 24 h).
//! Expired entries are deleted lazily on read and by an hourly background
//! sweep; a hit increments the entry's hit count and is returned with
//! **cost forced to zero** — a cache hit never bills.
//!
//! No LRU cap: TTL bounds staleness, not size. Deployments needing a size
//! bound or cross-instance sharing should put an external store behind the
//! same `get`/`insert` seam; the key is already process-stable, so no key
//! change is needed for that migration.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use sha2::{Digest, Sha256};
use tokio::time::Instant;
use tracing::debug;

use crate::telemetry;
use crate::types::{OperationOptions, PartInfo, StructuredResult, Tier, TokenUsage};

/// Configuration for the response cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Time-to-live for cached entries. Default: 24 hours.
    pub ttl: Duration,
    /// Interval between background sweeps. Default: 1 hour.
    pub sweep_interval: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(24 * 60 * 60),
            sweep_interval: Duration::from_secs(60 * 60),
        }
    }
}

impl CacheConfig {
    /// Create a config with the default TTL and sweep interval.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the entry time-to-live.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Set the background sweep interval.
    pub fn sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }
}

/// One cached execution result. Owned solely by the cache.
#[derive(Debug, Clone)]
struct CacheEntry {
    content: String,
    structured: Option<StructuredResult>,
    provider: String,
    model: String,
    tier: Tier,
    usage: TokenUsage,
    /// Cost of the original call; informational only, never re-billed.
    cost: f64,
    created_at: Instant,
    expires_at: Instant,
    hit_count: u64,
}

/// Response fields handed back on a cache hit.
///
/// `cost` is always `0.0` here regardless of what the original call cost —
/// hits never trigger a provider call and never bill.
#[derive(Debug, Clone)]
pub struct CacheHit {
    pub content: String,
    pub structured: Option<StructuredResult>,
    pub provider: String,
    pub model: String,
    pub tier: Tier,
    pub usage: TokenUsage,
    pub cost: f64,
}

/// Concurrent TTL cache over execution responses.
pub struct ResponseCache {
    entries: Arc<DashMap<String, CacheEntry>>,
    ttl: Duration,
    sweep_interval: Duration,
}

impl ResponseCache {
    /// Create a cache from the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            ttl: config.ttl,
            sweep_interval: config.sweep_interval,
        }
    }

    /// Look up a cached response.
    ///
    /// An absent or expired key is a miss; expired entries are deleted on
    /// touch. A hit increments the entry's hit count. Emits hit/miss
    /// telemetry labelled with `operation`.
    pub fn get(&self, key: &str, operation: &str) -> Option<CacheHit> {
        let now = Instant::now();

        // remove_if holds only the shard lock; no awaits inside.
        let expired = self
            .entries
            .remove_if(key, |_, entry| now >= entry.expires_at)
            .is_some();
        if expired {
            debug!(operation, "cache entry expired on read");
        }

        match self.entries.get_mut(key) {
            Some(mut entry) if now < entry.expires_at => {
                entry.hit_count += 1;
                debug!(
                    operation,
                    hit_count = entry.hit_count,
                    original_cost = entry.cost,
                    "cache hit"
                );
                metrics::counter!(telemetry::CACHE_HITS_TOTAL, "operation" => operation.to_owned())
                    .increment(1);
                Some(CacheHit {
                    content: entry.content.clone(),
                    structured: entry.structured.clone(),
                    provider: entry.provider.clone(),
                    model: entry.model.clone(),
                    tier: entry.tier,
                    usage: entry.usage,
                    cost: 0.0,
                })
            }
            _ => {
                metrics::counter!(telemetry::CACHE_MISSES_TOTAL, "operation" => operation.to_owned())
                    .increment(1);
                None
            }
        }
    }

    /// Store a response under `key` with a fresh expiry and zero hit count.
    #[allow(clippy::too_many_arguments)]
    pub fn insert(
        &self,
        key: String,
        content: String,
        structured: Option<StructuredResult>,
        provider: String,
        model: String,
        tier: Tier,
        usage: TokenUsage,
        cost: f64,
    ) {
        let now = Instant::now();
        self.entries.insert(
            key,
            CacheEntry {
                content,
                structured,
                provider,
                model,
                tier,
                usage,
                cost,
                created_at: now,
                expires_at: now + self.ttl,
                hit_count: 0,
            },
        );
    }

    /// Delete every expired entry, returning how many were removed.
    ///
    /// Safe to run concurrently with `get`/`insert`; `retain` locks one
    /// shard at a time.
    pub fn sweep(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| now < entry.expires_at);
        before - self.entries.len()
    }

    /// Spawn the periodic sweep on the current tokio runtime.
    ///
    /// The task holds only the entry map, so dropping the engine (and with
    /// it this handle's owner) plus aborting the handle fully releases the
    /// cache.
    pub fn spawn_sweeper(&self) -> tokio::task::JoinHandle<()> {
        let entries = Arc::clone(&self.entries);
        let interval = self.sweep_interval;
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // First tick fires immediately; skip it so the first sweep
            // happens one full interval after startup.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let now = Instant::now();
                let before = entries.len();
                entries.retain(|_, entry: &mut CacheEntry| now < entry.expires_at);
                let removed = before - entries.len();
                if removed > 0 {
                    debug!(removed, remaining = entries.len(), "cache sweep");
                }
            }
        })
    }

    /// Number of live plus not-yet-swept entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache currently holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Evict everything.
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Hit count recorded for a key, if present. Test/observability helper.
    pub fn hit_count(&self, key: &str) -> Option<u64> {
        self.entries.get(key).map(|entry| entry.hit_count)
    }

    /// Age of the entry under `key`, if present.
    pub fn age(&self, key: &str) -> Option<Duration> {
        self.entries
            .get(key)
            .map(|entry| Instant::now().duration_since(entry.created_at))
    }
}

/// Fingerprint key for one execution.
///
/// SHA-256 over the operation id, a digest of the content (so huge
/// documents hash once), the canonical options JSON, the plan flag, and
/// the part number for split documents. Stable across processes, so the
/// same key works against a future shared backend.
pub fn cache_key(
    operation: &str,
    content: &str,
    options: &OperationOptions,
    is_paid_user: bool,
    part: Option<PartInfo>,
) -> String {
    let content_digest = Sha256::digest(content.as_bytes());

    let mut hasher = Sha256::new();
    hasher.update(operation.as_bytes());
    hasher.update([0]);
    hasher.update(content_digest);
    hasher.update([0]);
    // OperationOptions is a closed enum with fixed field order, so its
    // JSON form is canonical.
    hasher.update(serde_json::to_string(options).unwrap_or_default().as_bytes());
    hasher.update([0]);
    hasher.update([u8::from(is_paid_user)]);
    if let Some(part) = part {
        hasher.update([0]);
        hasher.update(part.part_number.to_le_bytes());
    }

    hasher
        .finalize()
        .iter()
        .fold(String::with_capacity(64), |mut out, byte| {
            use std::fmt::Write;
            let _ = write!(out, "{byte:02x}");
            out
        })
}
