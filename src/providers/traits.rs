//! The narrow provider seam the engine depends on.
//!
//! Routing and execution know nothing about vendor SDKs: every provider —
//! hosted API, proxy, or test stub — implements [`ModelProvider`] and
//! nothing more. One adapter per vendor lives alongside this trait; the
//! engine holds them as trait objects keyed by tier.

use async_trait::async_trait;

use crate::Result;

/// Token usage as reported by a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// Raw output of one provider call.
#[derive(Debug, Clone)]
pub struct GenerateOutput {
    /// Generated text.
    pub text: String,
    /// Reported usage; `None` when the provider omits it, in which case
    /// the engine falls back to the char heuristic.
    pub usage: Option<ProviderUsage>,
}

/// A language-model provider capable of single-turn generation.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Provider name for logging and routing (e.g. "openai", "anthropic").
    fn name(&self) -> &str;

    /// Generate a completion for `prompt` on `model`.
    ///
    /// Transient failures (rate limit, 5xx, transport) must map to
    /// transient [`MuninnError`](crate::MuninnError) variants so the
    /// executor retries them; permanent failures (auth, 4xx) must not.
    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        max_output_tokens: u32,
        temperature: f32,
    ) -> Result<GenerateOutput>;
}
