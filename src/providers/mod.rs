//! Provider seam: the [`ModelProvider`] trait, per-tier provider set,
//! and the bundled OpenAI-compatible adapter.

mod openai_compat;
pub mod traits;

pub use openai_compat::OpenAiCompatProvider;
pub use traits::{GenerateOutput, ModelProvider, ProviderUsage};

use std::collections::HashMap;
use std::sync::Arc;

use crate::types::Tier;
use crate::{MuninnError, Result};

/// Providers registered per tier.
///
/// Built by the engine builder; every tier must be covered so routing and
/// fallback always have a target.
pub struct ProviderSet {
    providers: HashMap<Tier, Arc<dyn ModelProvider>>,
}

impl ProviderSet {
    /// Build a set, verifying every tier has a provider.
    pub fn new(providers: HashMap<Tier, Arc<dyn ModelProvider>>) -> Result<Self> {
        for tier in Tier::ALL {
            if !providers.contains_key(&tier) {
                return Err(MuninnError::NoProvider(tier.as_str()));
            }
        }
        Ok(Self { providers })
    }

    /// Provider serving the given tier.
    ///
    /// Infallible after construction — `new` rejects incomplete sets.
    pub fn for_tier(&self, tier: Tier) -> &Arc<dyn ModelProvider> {
        &self.providers[&tier]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct Stub;

    #[async_trait]
    impl ModelProvider for Stub {
        fn name(&self) -> &str {
            "stub"
        }

        async fn generate(
            &self,
            _model: &str,
            _prompt: &str,
            _max_output_tokens: u32,
            _temperature: f32,
        ) -> Result<GenerateOutput> {
            Ok(GenerateOutput {
                text: "ok".into(),
                usage: None,
            })
        }
    }

    #[test]
    fn rejects_missing_tier() {
        let mut providers: HashMap<Tier, Arc<dyn ModelProvider>> = HashMap::new();
        providers.insert(Tier::Simple, Arc::new(Stub));
        match ProviderSet::new(providers) {
            Err(MuninnError::NoProvider(_)) => {}
            Err(other) => panic!("wrong error: {other}"),
            Ok(_) => panic!("incomplete set accepted"),
        }
    }

    #[test]
    fn accepts_full_set() {
        let mut providers: HashMap<Tier, Arc<dyn ModelProvider>> = HashMap::new();
        for tier in Tier::ALL {
            providers.insert(tier, Arc::new(Stub));
        }
        let set = ProviderSet::new(providers).unwrap();
        assert_eq!(set.for_tier(Tier::Complex).name(), "stub");
    }
}
