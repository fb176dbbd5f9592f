//! Static operation registry: tier requirements, token caps, allowances.
//!
//! Loaded once at engine construction and immutable afterwards. Lookup
//! never fails outright: unknown ids resolve to a degraded descriptor on
//! the simple tier with conservative caps, so the engine always produces
//! *some* usable routing.

use tracing::warn;

use crate::types::{ResultKind, Tier};

/// Approximate token caps for one side of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenCaps {
    /// Maximum input tokens accepted (content is truncated to fit).
    pub input: u32,
    /// Maximum output tokens requested from the provider.
    pub output: u32,
}

impl TokenCaps {
    pub const fn new(input: u32, output: u32) -> Self {
        Self { input, output }
    }
}

/// Shape of an operation's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputShape {
    /// Free-form prose; the parser is skipped.
    Text,
    /// JSON matching the given result kind; parsed into
    /// [`StructuredResult`](crate::types::StructuredResult).
    Json(ResultKind),
}

/// One registered document-processing operation.
#[derive(Debug, Clone)]
pub struct OperationDescriptor {
    /// Operation id as callers spell it (e.g. `"CONTRACT_LAW_SCAN"`).
    pub id: String,
    /// Tier paid users are routed to.
    pub tier: Tier,
    /// Whether free-plan users may invoke this operation at all.
    pub free_allowed: bool,
    /// Token caps applied to free-plan calls.
    pub free_caps: TokenCaps,
    /// Token caps applied to paid calls.
    pub paid_caps: TokenCaps,
    /// Output shape; drives structured parsing.
    pub output: OutputShape,
}

impl OperationDescriptor {
    /// Caps for the given plan.
    pub fn caps(&self, is_paid_user: bool) -> TokenCaps {
        if is_paid_user {
            self.paid_caps
        } else {
            self.free_caps
        }
    }

    /// The result kind for JSON-shaped operations, `None` for text.
    pub fn result_kind(&self) -> Option<ResultKind> {
        match self.output {
            OutputShape::Json(kind) => Some(kind),
            OutputShape::Text => None,
        }
    }

    /// Degraded descriptor for an id the registry doesn't know.
    ///
    /// Simple tier, conservative caps, plain-text output, free-allowed.
    fn degraded(id: &str) -> Self {
        Self {
            id: id.to_owned(),
            tier: Tier::Simple,
            free_allowed: true,
            free_caps: TokenCaps::new(2_000, 500),
            paid_caps: TokenCaps::new(8_000, 1_000),
            output: OutputShape::Text,
        }
    }
}

/// Immutable table of all registered operations.
pub struct OperationRegistry {
    ops: std::collections::HashMap<&'static str, OperationDescriptor>,
}

/// Shorthand for building one registry row.
fn op(
    id: &'static str,
    tier: Tier,
    free_allowed: bool,
    free_caps: TokenCaps,
    paid_caps: TokenCaps,
    output: OutputShape,
) -> (&'static str, OperationDescriptor) {
    (
        id,
        OperationDescriptor {
            id: id.to_owned(),
            tier,
            free_allowed,
            free_caps,
            paid_caps,
            output,
        },
    )
}

impl OperationRegistry {
    /// The built-in operation table.
    pub fn builtin() -> Self {
        use OutputShape::{Json, Text};
        use ResultKind as K;
        use Tier::{Complex, Medium, Simple};

        // Free caps are deliberately tight; paid caps track what the
        // simple/medium/complex model contexts comfortably absorb.
        let free_s = TokenCaps::new(4_000, 800);
        let free_m = TokenCaps::new(6_000, 1_500);
        let paid_s = TokenCaps::new(16_000, 2_000);
        let paid_m = TokenCaps::new(32_000, 4_000);
        let paid_c = TokenCaps::new(64_000, 8_000);

        let ops = std::collections::HashMap::from([
            // Simple: high-volume rote transformations.
            op("SUMMARY_SHORT", Simple, true, free_s, paid_s, Text),
            op(
                "SUMMARY_BULLETS",
                Simple,
                true,
                free_s,
                paid_s,
                Json(K::BulletSummary),
            ),
            op("KEYWORDS", Simple, true, free_s, paid_s, Json(K::Keywords)),
            op(
                "DEFINITIONS",
                Simple,
                true,
                free_s,
                paid_s,
                Json(K::Definitions),
            ),
            op(
                "TRANSLATION",
                Simple,
                true,
                free_s,
                paid_s,
                Json(K::Translation),
            ),
            op("TEXT_CLEANUP", Simple, true, free_s, paid_s, Json(K::Cleanup)),
            // Medium: generation work that benefits from some reasoning.
            op(
                "SUMMARY_DETAILED",
                Medium,
                true,
                free_m,
                paid_m,
                Json(K::Summary),
            ),
            op(
                "FLASHCARDS",
                Medium,
                true,
                free_m,
                paid_m,
                Json(K::Flashcards),
            ),
            op("TEST_GENERATOR", Medium, true, free_m, paid_m, Json(K::Quiz)),
            op("NOTES", Medium, true, free_m, paid_m, Json(K::Notes)),
            op(
                "PRESENTATION",
                Medium,
                false,
                free_m,
                paid_m,
                Json(K::Presentation),
            ),
            op(
                "TEACHER_EXPLANATION",
                Medium,
                true,
                free_m,
                paid_m,
                Json(K::TeacherExplanation),
            ),
            op("SCRIPT", Medium, false, free_m, paid_m, Json(K::Script)),
            op("REPORT", Medium, false, free_m, paid_m, Json(K::Report)),
            op("CHART_DATA", Medium, false, free_m, paid_m, Json(K::ChartData)),
            op(
                "TOPIC_BREAKDOWN",
                Medium,
                true,
                free_m,
                paid_m,
                Json(K::TopicBreakdown),
            ),
            op("DOCUMENT_QA", Medium, true, free_m, paid_m, Json(K::Qa)),
            // Complex: low-volume, high-stakes analysis.
            op(
                "CONTRACT_LAW_SCAN",
                Complex,
                false,
                free_m,
                paid_c,
                Json(K::LegalScan),
            ),
            op(
                "AI_DETECTION",
                Complex,
                false,
                free_m,
                paid_c,
                Json(K::AiDetection),
            ),
            op(
                "DOCUMENT_COMPARISON",
                Complex,
                false,
                free_m,
                paid_c,
                Json(K::Comparison),
            ),
            op(
                "TREND_INSIGHTS",
                Complex,
                false,
                free_m,
                paid_c,
                Json(K::Insights),
            ),
        ]);
        Self { ops }
    }

    /// Exact lookup.
    pub fn get(&self, id: &str) -> Option<&OperationDescriptor> {
        self.ops.get(id)
    }

    /// Lookup that degrades instead of failing.
    ///
    /// Unknown ids get a simple-tier text descriptor and a logged warning.
    pub fn resolve(&self, id: &str) -> OperationDescriptor {
        match self.ops.get(id) {
            Some(descriptor) => descriptor.clone(),
            None => {
                warn!(operation = id, "unknown operation, degrading to simple tier");
                OperationDescriptor::degraded(id)
            }
        }
    }

    /// Number of registered operations.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Whether the registry is empty (never true for the builtin table).
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Iterate over all descriptors.
    pub fn iter(&self) -> impl Iterator<Item = &OperationDescriptor> {
        self.ops.values()
    }
}
