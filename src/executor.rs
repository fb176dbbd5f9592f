//! Resilient provider execution: timeout-raced attempts, exponential
//! backoff, and a single fallback attempt.
//!
//! The executor assumes pre-validated, authorised input — validation
//! failures are the caller's problem and never reach this layer. Only
//! provider-level failures are handled here: transient errors are retried
//! on the routed tier with capped exponential backoff; when the routed
//! tier is exhausted (or fails permanently), exactly one attempt is made
//! against the fixed fallback tier. Its failure is terminal.

use std::time::Duration;

use tracing::warn;

use crate::providers::{ProviderSet, ProviderUsage};
use crate::routing::{self, RoutingDecision};
use crate::telemetry;
use crate::types::Tier;
use crate::{MuninnError, Result};

/// Configuration for retry, backoff, and per-attempt timeout.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Retries after the initial attempt on the routed tier. Default: 3.
    pub max_retries: u32,
    /// Base backoff delay, doubled per attempt. Default: 1s.
    pub base_delay: Duration,
    /// Backoff ceiling. Default: 10s.
    pub max_delay: Duration,
    /// Per-attempt timeout; an attempt exceeding it is abandoned and
    /// counts as a transient failure. Default: 60s.
    pub attempt_timeout: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(10),
            attempt_timeout: Duration::from_secs(60),
        }
    }
}

impl RetryConfig {
    /// Create a config with the defaults above.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of retries after the initial attempt.
    pub fn max_retries(mut self, n: u32) -> Self {
        self.max_retries = n;
        self
    }

    /// Set the base backoff delay.
    pub fn base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    /// Set the backoff ceiling.
    pub fn max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Set the per-attempt timeout.
    pub fn attempt_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout = timeout;
        self
    }

    /// Backoff before retry number `attempt` (0-indexed):
    /// `min(base_delay * 2^attempt, max_delay)`.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_mul(2u32.saturating_pow(attempt))
            .min(self.max_delay)
    }

    /// Effective backoff, honouring a provider `retry_after` hint.
    pub fn effective_delay(&self, attempt: u32, retry_after: Option<Duration>) -> Duration {
        retry_after.unwrap_or_else(|| self.delay_for_attempt(attempt))
    }
}

/// Successful execution result plus resilience bookkeeping.
#[derive(Debug, Clone)]
pub(crate) struct ExecutionOutcome {
    pub text: String,
    pub usage: Option<ProviderUsage>,
    /// Failed attempts before this success, across both tiers.
    pub retries: u32,
    /// Tier that actually served the call.
    pub tier: Tier,
    pub provider: String,
    pub model: String,
}

/// One attempt, raced against the configured timeout.
///
/// The timer winning abandons (does not cancel) the in-flight call: the
/// provider may still finish server-side, but the result is discarded and
/// the attempt counts as a transient failure.
async fn attempt(
    providers: &ProviderSet,
    tier: Tier,
    model: &str,
    prompt: &str,
    max_output_tokens: u32,
    temperature: f32,
    timeout: Duration,
) -> Result<crate::providers::GenerateOutput> {
    let provider = providers.for_tier(tier);
    match tokio::time::timeout(
        timeout,
        provider.generate(model, prompt, max_output_tokens, temperature),
    )
    .await
    {
        Ok(result) => result,
        Err(_) => Err(MuninnError::Timeout(timeout)),
    }
}

/// Execute the routed call with retries, backoff, and one fallback.
pub(crate) async fn execute_with_resilience(
    providers: &ProviderSet,
    decision: &RoutingDecision,
    prompt: &str,
    operation: &str,
    config: &RetryConfig,
) -> Result<ExecutionOutcome> {
    let attempts = config.max_retries + 1;
    let mut failed_attempts = 0u32;
    let mut last_err = None;

    for attempt_no in 0..attempts {
        match attempt(
            providers,
            decision.tier,
            decision.model,
            prompt,
            decision.max_output_tokens,
            decision.temperature,
            config.attempt_timeout,
        )
        .await
        {
            Ok(output) => {
                return Ok(ExecutionOutcome {
                    text: output.text,
                    usage: output.usage,
                    retries: failed_attempts,
                    tier: decision.tier,
                    provider: decision.provider.to_owned(),
                    model: decision.model.to_owned(),
                });
            }
            Err(error) => {
                failed_attempts += 1;
                let transient = error.is_transient();
                metrics::counter!(telemetry::RETRIES_TOTAL,
                    "operation" => operation.to_owned(),
                    "tier" => decision.tier.as_str(),
                )
                .increment(1);
                warn!(
                    operation,
                    tier = %decision.tier,
                    attempt = attempt_no + 1,
                    max_attempts = attempts,
                    transient,
                    error = %error,
                    "provider attempt failed"
                );
                let retry_after = error.retry_after();
                last_err = Some(error);
                if !transient {
                    // Retrying a permanent error on the same tier is
                    // pointless; go straight to the fallback.
                    break;
                }
                if attempt_no + 1 < attempts {
                    tokio::time::sleep(config.effective_delay(attempt_no, retry_after)).await;
                }
            }
        }
    }

    // Routed tier exhausted: one attempt against the fixed fallback tier.
    let fb_tier = routing::fallback_tier(decision.tier);
    let fb_profile = routing::profile(fb_tier);
    metrics::counter!(telemetry::FALLBACKS_TOTAL, "operation" => operation.to_owned()).increment(1);
    warn!(
        operation,
        routed_tier = %decision.tier,
        fallback_tier = %fb_tier,
        "routed tier exhausted, attempting fallback"
    );

    match attempt(
        providers,
        fb_tier,
        fb_profile.model,
        prompt,
        decision.max_output_tokens,
        fb_profile.temperature,
        config.attempt_timeout,
    )
    .await
    {
        Ok(output) => Ok(ExecutionOutcome {
            text: output.text,
            usage: output.usage,
            retries: failed_attempts,
            tier: fb_tier,
            provider: fb_profile.provider.to_owned(),
            model: fb_profile.model.to_owned(),
        }),
        Err(fallback_err) => {
            warn!(operation, error = %fallback_err, "fallback attempt failed, giving up");
            // Surface the primary tier's error as the cause; the fallback
            // error replaces it only if the primary somehow never ran.
            let source = last_err.unwrap_or(fallback_err);
            Err(MuninnError::Terminal {
                retries: failed_attempts,
                source: Box::new(source),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_doubles_and_caps() {
        let config = RetryConfig::new();
        assert_eq!(config.delay_for_attempt(0), Duration::from_secs(1));
        assert_eq!(config.delay_for_attempt(1), Duration::from_secs(2));
        assert_eq!(config.delay_for_attempt(2), Duration::from_secs(4));
        assert_eq!(config.delay_for_attempt(3), Duration::from_secs(8));
        assert_eq!(config.delay_for_attempt(4), Duration::from_secs(10));
        assert_eq!(config.delay_for_attempt(30), Duration::from_secs(10));
    }

    #[test]
    fn retry_after_hint_wins() {
        let config = RetryConfig::new();
        let hint = Some(Duration::from_millis(250));
        assert_eq!(config.effective_delay(3, hint), Duration::from_millis(250));
        assert_eq!(config.effective_delay(3, None), Duration::from_secs(8));
    }

    #[test]
    fn config_builder_methods() {
        let config = RetryConfig::new()
            .max_retries(5)
            .base_delay(Duration::from_millis(100))
            .max_delay(Duration::from_secs(2))
            .attempt_timeout(Duration::from_secs(30));
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.base_delay, Duration::from_millis(100));
        assert_eq!(config.max_delay, Duration::from_secs(2));
        assert_eq!(config.attempt_timeout, Duration::from_secs(30));
    }
}
