//! Tier profiles and the pure routing decision.
//!
//! Routing is a side-effect-free function of (operation descriptor, plan):
//! free users always land on the simple tier, paid users land on the tier
//! the operation is registered with. The decision carries the provider and
//! model identifiers, the effective token caps, and a cap-bounded cost
//! estimate for observability — actual cost is derived later from reported
//! usage.

use serde::Serialize;

use crate::registry::OperationDescriptor;
use crate::types::Tier;

/// Static provider+model pairing for one tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierProfile {
    pub tier: Tier,
    /// Provider id, matched against registered provider names.
    pub provider: &'static str,
    /// Model id as the provider spells it.
    pub model: &'static str,
    /// USD per million input tokens.
    pub input_cost_per_mtok: f64,
    /// USD per million output tokens.
    pub output_cost_per_mtok: f64,
    /// Sampling temperature used for this tier's workloads.
    pub temperature: f32,
}

/// One profile per tier, ascending cost order.
static PROFILES: [TierProfile; 3] = [
    TierProfile {
        tier: Tier::Simple,
        provider: "openai",
        model: "gpt-4o-mini",
        input_cost_per_mtok: 0.15,
        output_cost_per_mtok: 0.60,
        temperature: 0.3,
    },
    TierProfile {
        tier: Tier::Medium,
        provider: "openai",
        model: "gpt-4o",
        input_cost_per_mtok: 2.50,
        output_cost_per_mtok: 10.00,
        temperature: 0.5,
    },
    TierProfile {
        tier: Tier::Complex,
        provider: "anthropic",
        model: "claude-sonnet-4",
        input_cost_per_mtok: 3.00,
        output_cost_per_mtok: 15.00,
        temperature: 0.2,
    },
];

/// The static profile for a tier.
pub fn profile(tier: Tier) -> &'static TierProfile {
    &PROFILES[tier.index()]
}

/// The fixed fallback tier used after the routed tier is exhausted.
///
/// The simple tier is the cheapest and most reliable target; when the
/// routed tier *is* simple, the medium tier stands in so the fallback is
/// always distinct from the primary.
pub fn fallback_tier(routed: Tier) -> Tier {
    if routed == Tier::Simple {
        Tier::Medium
    } else {
        Tier::Simple
    }
}

/// A per-call routing decision. Derived, never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct RoutingDecision {
    pub tier: Tier,
    pub provider: &'static str,
    pub model: &'static str,
    /// Input cap the budget manager enforces.
    pub max_input_tokens: u32,
    /// Output cap passed to the provider.
    pub max_output_tokens: u32,
    /// Sampling temperature for the call.
    pub temperature: f32,
    /// Upper-bound cost estimate at the configured caps. Zero for free
    /// users — their calls are never billed.
    pub estimated_cost: f64,
    /// Human-readable routing rationale for logs and debugging.
    pub reason: String,
}

/// Map (operation, plan) to a concrete provider call shape.
pub fn route(descriptor: &OperationDescriptor, is_paid_user: bool) -> RoutingDecision {
    let tier = if is_paid_user {
        descriptor.tier
    } else {
        Tier::Simple
    };
    let profile = profile(tier);
    let caps = descriptor.caps(is_paid_user);

    let estimated_cost = if is_paid_user {
        estimate_cost(profile, caps.input, caps.output)
    } else {
        0.0
    };

    let reason = if is_paid_user {
        format!(
            "paid plan: {} routes to {} tier ({}/{})",
            descriptor.id, tier, profile.provider, profile.model
        )
    } else {
        format!(
            "free plan: {} pinned to simple tier ({}/{})",
            descriptor.id, profile.provider, profile.model
        )
    };

    RoutingDecision {
        tier,
        provider: profile.provider,
        model: profile.model,
        max_input_tokens: caps.input,
        max_output_tokens: caps.output,
        temperature: profile.temperature,
        estimated_cost,
        reason,
    }
}

/// Cost in USD for the given token counts at a tier's pricing.
pub fn estimate_cost(profile: &TierProfile, input_tokens: u32, output_tokens: u32) -> f64 {
    let input = f64::from(input_tokens) / 1_000_000.0 * profile.input_cost_per_mtok;
    let output = f64::from(output_tokens) / 1_000_000.0 * profile.output_cost_per_mtok;
    input + output
}
