//! Execution response and token usage types.

use serde::{Deserialize, Serialize};

use super::structured::StructuredResult;
use super::tier::Tier;

/// Result of a single [`ExecuteRequest`](super::ExecuteRequest).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecuteResponse {
    /// Always `true` for a returned response; failures surface as errors.
    pub success: bool,

    /// Raw model output text.
    pub content: String,

    /// Typed result, present when the operation's output is JSON-shaped
    /// and parsing succeeded. Parse failures leave this `None` without
    /// invalidating `content`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structured_content: Option<StructuredResult>,

    /// Provider that served the call (or the cached original).
    pub provider: String,

    /// Model that served the call.
    pub model: String,

    /// Tier that actually served the call — the fallback tier when the
    /// routed tier was exhausted.
    pub tier: Tier,

    /// Token usage for the call; zeroed fields on a cache hit mirror the
    /// original call's usage.
    pub tokens_used: TokenUsage,

    /// Cost in USD. Always `0.0` for cache hits and free-plan calls.
    pub cost: f64,

    /// Wall-clock time spent in `execute`, milliseconds.
    pub processing_time_ms: u64,

    /// Whether this response was served from the cache.
    pub cached: bool,

    /// Fingerprint key the response is stored under.
    pub cache_key: String,

    /// Retries performed before success. `None` on cache hits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_count: Option<u32>,
}

/// Token usage statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input: u32,
    pub output: u32,
    pub total: u32,
}

impl TokenUsage {
    /// Build usage from input/output counts.
    pub fn new(input: u32, output: u32) -> Self {
        Self {
            input,
            output,
            total: input + output,
        }
    }
}
