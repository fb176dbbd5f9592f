//! Execution request types.

use serde::{Deserialize, Serialize};

/// A single document-processing request handed to the engine.
///
/// Content is assumed to be plain text already extracted from the source
/// document, and the caller is assumed to have authorised the operation
/// for this user — the engine only enforces the free/paid allowance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecuteRequest {
    /// Operation id (e.g. `"SUMMARY_SHORT"`, `"CONTRACT_LAW_SCAN"`).
    pub operation: String,

    /// Plain-text document content.
    pub content: String,

    /// Operation-family options, validated at the boundary.
    #[serde(default)]
    pub options: OperationOptions,

    /// Whether the requesting account is on a paid plan.
    #[serde(default)]
    pub is_paid_user: bool,

    /// Requesting user, for audit logging only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    /// Source document, for audit logging only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,

    /// Set when a large document was split upstream and this request
    /// covers one part. Participates in the cache key so parts don't
    /// collide.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part: Option<PartInfo>,
}

impl ExecuteRequest {
    /// Create a request with default options, free plan.
    pub fn new(operation: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            content: content.into(),
            options: OperationOptions::default(),
            is_paid_user: false,
            user_id: None,
            document_id: None,
            part: None,
        }
    }

    /// Mark the request as coming from a paid account.
    pub fn paid(mut self, paid: bool) -> Self {
        self.is_paid_user = paid;
        self
    }

    /// Attach operation-family options.
    pub fn options(mut self, options: OperationOptions) -> Self {
        self.options = options;
        self
    }

    /// Attach the requesting user id.
    pub fn user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Attach the source document id.
    pub fn document(mut self, document_id: impl Into<String>) -> Self {
        self.document_id = Some(document_id.into());
        self
    }

    /// Mark this request as one part of a split document.
    pub fn part(mut self, part_number: u32, total_parts: u32) -> Self {
        self.part = Some(PartInfo {
            part_number,
            total_parts,
        });
        self
    }
}

/// Position of this request within a split document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartInfo {
    /// 1-based part index.
    pub part_number: u32,
    /// Total number of parts the document was split into.
    pub total_parts: u32,
}

/// Closed per-operation-family options.
///
/// Replaces a free-form `map<string, any>` bag: each operation family gets
/// exactly the knobs it understands, validated at the boundary before any
/// of this reaches routing or prompt construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum OperationOptions {
    /// No options; the operation's defaults apply.
    #[default]
    None,

    /// Translation target.
    Translation {
        /// Target language name or BCP 47 tag (e.g. "German", "pt-BR").
        target_language: String,
    },

    /// Quiz/test generation shape.
    Quiz {
        /// Number of questions to produce.
        question_count: u32,
        /// Requested difficulty.
        #[serde(default)]
        difficulty: Difficulty,
    },

    /// Flashcard deck size.
    Flashcards {
        /// Number of cards to produce.
        card_count: u32,
    },

    /// Presentation length.
    Presentation {
        /// Number of slides to produce.
        slide_count: u32,
    },

    /// Summary focus hint.
    Summary {
        /// Optional aspect to emphasise.
        #[serde(skip_serializing_if = "Option::is_none")]
        focus: Option<String>,
    },
}

/// Requested difficulty for generated quizzes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_builder_defaults() {
        let req = ExecuteRequest::new("SUMMARY_SHORT", "hello");
        assert!(!req.is_paid_user);
        assert_eq!(req.options, OperationOptions::None);
        assert!(req.part.is_none());
    }

    #[test]
    fn request_builder_sets_part() {
        let req = ExecuteRequest::new("NOTES", "x").part(2, 5);
        let part = req.part.unwrap();
        assert_eq!(part.part_number, 2);
        assert_eq!(part.total_parts, 5);
    }

    #[test]
    fn options_round_trip() {
        let opts = OperationOptions::Quiz {
            question_count: 10,
            difficulty: Difficulty::Hard,
        };
        let json = serde_json::to_string(&opts).unwrap();
        let back: OperationOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back, opts);
    }

    #[test]
    fn options_default_is_none_variant() {
        let back: OperationOptions = serde_json::from_str(r#"{"family": "none"}"#).unwrap();
        assert_eq!(back, OperationOptions::None);
    }
}
