//! Engine counters and `metrics` facade emission.
//!
//! The facade tests install a `DebuggingRecorder` as a thread-local
//! recorder, so they must execute the async body on the same thread via
//! `block_in_place` inside a multi-thread runtime.

use std::sync::Arc;

use async_trait::async_trait;
use metrics_util::debugging::{DebugValue, DebuggingRecorder};
use muninn::providers::{GenerateOutput, ModelProvider, ProviderUsage};
use muninn::{ExecuteRequest, Muninn, MuninnError, Result, Tier};

struct EchoProvider;

#[async_trait]
impl ModelProvider for EchoProvider {
    fn name(&self) -> &str {
        "echo"
    }

    async fn generate(
        &self,
        _model: &str,
        _prompt: &str,
        _max_output_tokens: u32,
        _temperature: f32,
    ) -> Result<GenerateOutput> {
        Ok(GenerateOutput {
            text: "echoed".to_owned(),
            usage: Some(ProviderUsage {
                input_tokens: 200,
                output_tokens: 80,
            }),
        })
    }
}

struct BrokenProvider;

#[async_trait]
impl ModelProvider for BrokenProvider {
    fn name(&self) -> &str {
        "broken"
    }

    async fn generate(
        &self,
        _model: &str,
        _prompt: &str,
        _max_output_tokens: u32,
        _temperature: f32,
    ) -> Result<GenerateOutput> {
        Err(MuninnError::AuthenticationFailed)
    }
}

fn echo_engine() -> muninn::Engine {
    Muninn::builder()
        .provider_for_all_tiers(Arc::new(EchoProvider))
        .build()
        .unwrap()
}

// -------------------------------------------------------------------------
// Engine-owned counters
// -------------------------------------------------------------------------

#[tokio::test]
async fn snapshot_reflects_requests_hits_and_misses() {
    let engine = echo_engine();
    let request = ExecuteRequest::new("SUMMARY_SHORT", "doc").paid(true);

    engine.execute(request.clone()).await.unwrap();
    engine.execute(request).await.unwrap();

    let snap = engine.metrics().snapshot();
    assert_eq!(snap.requests, 2);
    assert_eq!(snap.cache_misses, 1);
    assert_eq!(snap.cache_hits, 1);
    assert!((snap.cache_hit_rate() - 0.5).abs() < 1e-9);
    assert_eq!(snap.tier_calls.for_tier(Tier::Simple), 1);
    assert!(snap.total_cost > 0.0);
}

#[tokio::test]
async fn tier_calls_follow_routing() {
    let engine = echo_engine();
    engine
        .execute(ExecuteRequest::new("SUMMARY_SHORT", "a").paid(true))
        .await
        .unwrap();
    engine
        .execute(ExecuteRequest::new("NOTES", "b").paid(true))
        .await
        .unwrap();
    engine
        .execute(ExecuteRequest::new("AI_DETECTION", "c").paid(true))
        .await
        .unwrap();

    let calls = engine.metrics().snapshot().tier_calls;
    assert_eq!(calls.for_tier(Tier::Simple), 1);
    assert_eq!(calls.for_tier(Tier::Medium), 1);
    assert_eq!(calls.for_tier(Tier::Complex), 1);
    assert_eq!(calls.total(), 3);
}

#[tokio::test(start_paused = true)]
async fn terminal_failures_record_errors() {
    let engine = Muninn::builder()
        .provider_for_all_tiers(Arc::new(BrokenProvider))
        .build()
        .unwrap();

    let err = engine
        .execute(ExecuteRequest::new("SUMMARY_SHORT", "doc"))
        .await
        .unwrap_err();
    assert!(matches!(err, MuninnError::Terminal { .. }));

    let snap = engine.metrics().snapshot();
    assert_eq!(snap.requests, 1);
    assert_eq!(snap.tier_errors.for_tier(Tier::Simple), 1);
    assert_eq!(snap.tier_calls.total(), 0);
}

#[tokio::test]
async fn reset_zeroes_the_collector() {
    let engine = echo_engine();
    engine
        .execute(ExecuteRequest::new("SUMMARY_SHORT", "doc"))
        .await
        .unwrap();
    engine.metrics().reset();

    let snap = engine.metrics().snapshot();
    assert_eq!(snap.requests, 0);
    assert_eq!(snap.total_cost, 0.0);
    assert_eq!(snap.cache_misses, 0);
}

// -------------------------------------------------------------------------
// Facade emission
// -------------------------------------------------------------------------

type SnapshotVec = Vec<(
    metrics_util::CompositeKey,
    Option<metrics::Unit>,
    Option<metrics::SharedString>,
    DebugValue,
)>;

fn counter_total(snapshot: &SnapshotVec, name: &str) -> u64 {
    snapshot
        .iter()
        .filter(|(key, _, _, _)| key.key().name() == name)
        .map(|(_, _, _, value)| match value {
            DebugValue::Counter(v) => *v,
            _ => 0,
        })
        .sum()
}

fn has_histogram(snapshot: &SnapshotVec, name: &str) -> bool {
    snapshot.iter().any(|(key, _, _, value)| {
        key.key().name() == name && matches!(value, DebugValue::Histogram(_))
    })
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn execute_emits_request_and_token_telemetry() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    metrics::with_local_recorder(&recorder, || {
        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async {
                let engine = echo_engine();
                let request = ExecuteRequest::new("SUMMARY_SHORT", "doc").paid(true);
                engine.execute(request.clone()).await.unwrap();
                engine.execute(request).await.unwrap();
            })
        })
    });

    let snapshot = snapshotter.snapshot().into_vec();
    assert_eq!(counter_total(&snapshot, "muninn_requests_total"), 2);
    assert_eq!(counter_total(&snapshot, "muninn_cache_misses_total"), 1);
    assert_eq!(counter_total(&snapshot, "muninn_cache_hits_total"), 1);
    // 200 input + 80 output from the provider's reported usage.
    assert_eq!(counter_total(&snapshot, "muninn_tokens_total"), 280);
    assert!(has_histogram(&snapshot, "muninn_request_duration_seconds"));
    assert!(has_histogram(&snapshot, "muninn_cost_usd"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn failures_emit_retry_and_fallback_telemetry() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    metrics::with_local_recorder(&recorder, || {
        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async {
                let engine = Muninn::builder()
                    .provider_for_all_tiers(Arc::new(BrokenProvider))
                    .build()
                    .unwrap();
                let _ = engine
                    .execute(ExecuteRequest::new("SUMMARY_SHORT", "doc"))
                    .await;
            })
        })
    });

    let snapshot = snapshotter.snapshot().into_vec();
    // Permanent error: one primary failure, then the single fallback.
    assert_eq!(counter_total(&snapshot, "muninn_retries_total"), 1);
    assert_eq!(counter_total(&snapshot, "muninn_fallbacks_total"), 1);
    assert_eq!(counter_total(&snapshot, "muninn_requests_total"), 1);
}
