//! Telemetry metric name constants.
//!
//! Centralised metric names for muninn operations. Consumers install
//! their own `metrics` recorder (e.g. prometheus, statsd); without a
//! recorder installed, all metric calls are no-ops.
//!
//! Process-local counters with snapshot/reset semantics live in
//! [`EngineMetrics`](crate::metrics::EngineMetrics); this module is the
//! export-facing facade.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `muninn_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `operation` — operation id (e.g. "SUMMARY_SHORT")
//! - `tier` — routed tier ("simple" | "medium" | "complex")
//! - `status` — outcome: "ok" or "error"

/// Total execute requests handled by the engine.
///
/// Labels: `operation`, `tier`, `status` ("ok" | "error").
pub const REQUESTS_TOTAL: &str = "muninn_requests_total";

/// End-to-end execute duration in seconds.
///
/// Labels: `operation`, `tier`.
pub const REQUEST_DURATION_SECONDS: &str = "muninn_request_duration_seconds";

/// Total failed provider attempts on the routed tier, the initial
/// attempt included.
///
/// Labels: `operation`, `tier`.
pub const RETRIES_TOTAL: &str = "muninn_retries_total";

/// Total fallback-tier attempts after primary exhaustion.
///
/// Labels: `operation`.
pub const FALLBACKS_TOTAL: &str = "muninn_fallbacks_total";

/// Total tokens consumed.
///
/// Labels: `tier`, `direction` ("input" | "output").
pub const TOKENS_TOTAL: &str = "muninn_tokens_total";

/// Accumulated provider cost in USD.
///
/// Labels: `tier`.
pub const COST_USD: &str = "muninn_cost_usd";

/// Total response cache hits.
///
/// Labels: `operation`.
pub const CACHE_HITS_TOTAL: &str = "muninn_cache_hits_total";

/// Total response cache misses.
///
/// Labels: `operation`.
pub const CACHE_MISSES_TOTAL: &str = "muninn_cache_misses_total";

/// Structured-output parse failures (non-fatal).
///
/// Labels: `operation`.
pub const PARSE_FAILURES_TOTAL: &str = "muninn_parse_failures_total";
