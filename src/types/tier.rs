//! Cost/capability tiers for provider routing.

use serde::{Deserialize, Serialize};

/// A cost/capability bucket assigned to a provider+model pairing.
///
/// Every operation declares the tier it needs; free users are always
/// routed to [`Tier::Simple`] regardless of that declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Cheapest and fastest; high-volume rote transformations.
    Simple,
    /// Mid-priced models with moderate reasoning ability.
    Medium,
    /// Reasoning-heavy models reserved for low-volume, high-stakes work
    /// (legal analysis, multi-document synthesis, insight extraction,
    /// AI detection).
    Complex,
}

impl Tier {
    /// All tiers, in ascending cost order.
    pub const ALL: [Tier; 3] = [Tier::Simple, Tier::Medium, Tier::Complex];

    /// Stable string form, used in labels and responses.
    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Simple => "simple",
            Tier::Medium => "medium",
            Tier::Complex => "complex",
        }
    }

    /// Dense index for per-tier counter arrays.
    pub(crate) fn index(self) -> usize {
        match self {
            Tier::Simple => 0,
            Tier::Medium => 1,
            Tier::Complex => 2,
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
