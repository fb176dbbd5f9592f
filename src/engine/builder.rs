//! Builder for configuring engine instances.

use std::collections::HashMap;
use std::sync::Arc;

use super::Engine;
use crate::cache::{CacheConfig, ResponseCache};
use crate::executor::RetryConfig;
use crate::metrics::EngineMetrics;
use crate::providers::{ModelProvider, ProviderSet};
use crate::registry::OperationRegistry;
use crate::types::Tier;
use crate::Result;

/// Main entry point for creating engine instances.
pub struct Muninn;

impl Muninn {
    /// Create a new builder for configuring the engine.
    pub fn builder() -> MuninnBuilder {
        MuninnBuilder::new()
    }
}

/// Builder for configuring engine instances.
///
/// A provider must be registered for every tier; cache and retry configs
/// fall back to their defaults (24 h TTL, hourly sweep, 3 retries, 60 s
/// attempt timeout). `build()` is synchronous and spawns nothing — start
/// the background sweep explicitly with
/// [`Engine::start_cache_sweeper`](super::Engine::start_cache_sweeper).
pub struct MuninnBuilder {
    providers: HashMap<Tier, Arc<dyn ModelProvider>>,
    cache_config: CacheConfig,
    retry_config: RetryConfig,
}

impl MuninnBuilder {
    pub fn new() -> Self {
        Self {
            providers: HashMap::new(),
            cache_config: CacheConfig::default(),
            retry_config: RetryConfig::default(),
        }
    }

    /// Register the provider serving `tier`.
    ///
    /// The same provider instance may serve several tiers (the tier still
    /// selects its own model id).
    pub fn provider(mut self, tier: Tier, provider: Arc<dyn ModelProvider>) -> Self {
        self.providers.insert(tier, provider);
        self
    }

    /// Register one provider for all three tiers.
    pub fn provider_for_all_tiers(mut self, provider: Arc<dyn ModelProvider>) -> Self {
        for tier in Tier::ALL {
            self.providers.insert(tier, Arc::clone(&provider));
        }
        self
    }

    /// Override the cache configuration.
    pub fn cache(mut self, config: CacheConfig) -> Self {
        self.cache_config = config;
        self
    }

    /// Override the retry/backoff/timeout configuration.
    pub fn retry(mut self, config: RetryConfig) -> Self {
        self.retry_config = config;
        self
    }

    /// Build the engine.
    ///
    /// Fails with [`MuninnError::NoProvider`](crate::MuninnError::NoProvider)
    /// if any tier is missing a provider.
    pub fn build(self) -> Result<Engine> {
        let providers = ProviderSet::new(self.providers)?;
        Ok(Engine {
            registry: OperationRegistry::builtin(),
            providers,
            cache: ResponseCache::new(&self.cache_config),
            metrics: Arc::new(EngineMetrics::new()),
            retry: self.retry_config,
        })
    }
}

impl Default for MuninnBuilder {
    fn default() -> Self {
        Self::new()
    }
}
