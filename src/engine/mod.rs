//! The engine facade: one `execute` entrypoint over routing, budgeting,
//! caching, resilient execution, parsing, and metrics.
//!
//! An [`Engine`] is an explicit service instance owning its cache map and
//! counters — no ambient globals. Handlers hold it behind an `Arc` and
//! call [`Engine::execute`] concurrently; all shared state (cache,
//! metrics) is internally synchronised, and no lock is held across a
//! provider call.

mod builder;

pub use builder::{Muninn, MuninnBuilder};

use std::sync::Arc;

use tracing::debug;

use crate::budget;
use crate::cache::{self, ResponseCache};
use crate::executor::{self, RetryConfig};
use crate::metrics::EngineMetrics;
use crate::parser;
use crate::prompt;
use crate::providers::ProviderSet;
use crate::registry::OperationRegistry;
use crate::routing;
use crate::telemetry;
use crate::types::{ExecuteRequest, ExecuteResponse, TokenUsage};
use crate::{MuninnError, Result};

/// Document AI execution engine.
pub struct Engine {
    pub(crate) registry: OperationRegistry,
    pub(crate) providers: ProviderSet,
    pub(crate) cache: ResponseCache,
    pub(crate) metrics: Arc<EngineMetrics>,
    pub(crate) retry: RetryConfig,
}

impl Engine {
    /// Create a new builder for configuring the engine.
    pub fn builder() -> MuninnBuilder {
        Muninn::builder()
    }

    /// The engine's metrics collector.
    pub fn metrics(&self) -> Arc<EngineMetrics> {
        Arc::clone(&self.metrics)
    }

    /// The operation registry this engine routes against.
    pub fn registry(&self) -> &OperationRegistry {
        &self.registry
    }

    /// The response cache. Exposed for maintenance (`len`, `clear`).
    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// Spawn the hourly cache sweep on the current tokio runtime.
    ///
    /// Abort the returned handle on shutdown; expired entries are also
    /// deleted lazily on read, so the sweep is hygiene, not correctness.
    pub fn start_cache_sweeper(&self) -> tokio::task::JoinHandle<()> {
        self.cache.spawn_sweeper()
    }

    /// Execute one document-processing request.
    ///
    /// Flow: free-allowance check, degrading descriptor resolution, pure
    /// routing, budget truncation, prompt construction, cache lookup (a
    /// hit returns immediately with cost 0), resilient provider execution,
    /// structured parsing for JSON-shaped operations, cache insert, and
    /// metrics/telemetry updates.
    pub async fn execute(&self, request: ExecuteRequest) -> Result<ExecuteResponse> {
        let started = tokio::time::Instant::now();
        self.metrics.record_request();

        let descriptor = self.registry.resolve(&request.operation);
        if !request.is_paid_user && !descriptor.free_allowed {
            return Err(MuninnError::Validation(format!(
                "operation '{}' requires a paid plan",
                descriptor.id
            )));
        }

        let decision = routing::route(&descriptor, request.is_paid_user);
        debug!(
            operation = %descriptor.id,
            tier = %decision.tier,
            reason = %decision.reason,
            "routed"
        );

        let key = cache::cache_key(
            &descriptor.id,
            &request.content,
            &request.options,
            request.is_paid_user,
            request.part,
        );

        if let Some(hit) = self.cache.get(&key, &descriptor.id) {
            self.metrics.record_cache_hit();
            let elapsed = started.elapsed();
            metrics::counter!(telemetry::REQUESTS_TOTAL,
                "operation" => descriptor.id.clone(),
                "tier" => hit.tier.as_str(),
                "status" => "ok",
            )
            .increment(1);
            return Ok(ExecuteResponse {
                success: true,
                content: hit.content,
                structured_content: hit.structured,
                provider: hit.provider,
                model: hit.model,
                tier: hit.tier,
                tokens_used: hit.usage,
                cost: hit.cost,
                processing_time_ms: elapsed.as_millis() as u64,
                cached: true,
                cache_key: key,
                retry_count: None,
            });
        }
        self.metrics.record_cache_miss();

        let budgeted = budget::fit_to_budget(&request.content, decision.max_input_tokens);
        if budgeted.truncated {
            debug!(
                operation = %descriptor.id,
                cap = decision.max_input_tokens,
                "content truncated to input cap"
            );
        }
        let rendered = prompt::build_prompt(&descriptor, &request.options, &budgeted.text);

        let outcome = match executor::execute_with_resilience(
            &self.providers,
            &decision,
            &rendered,
            &descriptor.id,
            &self.retry,
        )
        .await
        {
            Ok(outcome) => outcome,
            Err(error) => {
                self.metrics.record_error(decision.tier);
                metrics::counter!(telemetry::REQUESTS_TOTAL,
                    "operation" => descriptor.id.clone(),
                    "tier" => decision.tier.as_str(),
                    "status" => "error",
                )
                .increment(1);
                return Err(error);
            }
        };

        // Provider-reported usage when available, char heuristic otherwise.
        let usage = match outcome.usage {
            Some(u) => TokenUsage::new(u.input_tokens, u.output_tokens),
            None => TokenUsage::new(
                budget::estimate_tokens(&rendered),
                budget::estimate_tokens(&outcome.text),
            ),
        };
        let cost = if request.is_paid_user {
            routing::estimate_cost(routing::profile(outcome.tier), usage.input, usage.output)
        } else {
            0.0
        };

        let structured = descriptor
            .result_kind()
            .and_then(|kind| parser::parse_structured(kind, &descriptor.id, &outcome.text));

        self.cache.insert(
            key.clone(),
            outcome.text.clone(),
            structured.clone(),
            outcome.provider.clone(),
            outcome.model.clone(),
            outcome.tier,
            usage,
            cost,
        );

        self.metrics.record_success(outcome.tier, cost);
        let elapsed = started.elapsed();
        metrics::counter!(telemetry::REQUESTS_TOTAL,
            "operation" => descriptor.id.clone(),
            "tier" => outcome.tier.as_str(),
            "status" => "ok",
        )
        .increment(1);
        metrics::histogram!(telemetry::REQUEST_DURATION_SECONDS,
            "operation" => descriptor.id.clone(),
            "tier" => outcome.tier.as_str(),
        )
        .record(elapsed.as_secs_f64());
        metrics::counter!(telemetry::TOKENS_TOTAL,
            "tier" => outcome.tier.as_str(),
            "direction" => "input",
        )
        .increment(u64::from(usage.input));
        metrics::counter!(telemetry::TOKENS_TOTAL,
            "tier" => outcome.tier.as_str(),
            "direction" => "output",
        )
        .increment(u64::from(usage.output));
        metrics::histogram!(telemetry::COST_USD, "tier" => outcome.tier.as_str()).record(cost);

        Ok(ExecuteResponse {
            success: true,
            content: outcome.text,
            structured_content: structured,
            provider: outcome.provider,
            model: outcome.model,
            tier: outcome.tier,
            tokens_used: usage,
            cost,
            processing_time_ms: elapsed.as_millis() as u64,
            cached: false,
            cache_key: key,
            retry_count: Some(outcome.retries),
        })
    }
}
