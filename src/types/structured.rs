//! Typed result shapes for JSON-producing operations.
//!
//! [`StructuredResult`] is a serde-tagged union: the `type` field is the
//! discriminator and always matches the [`ResultKind`] the producing
//! operation is registered with. The parser injects the tag before
//! deserialising, so model output never has to (and never gets to) pick
//! its own discriminator.

use serde::{Deserialize, Serialize};

/// Discriminator for the structured result an operation produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultKind {
    Summary,
    BulletSummary,
    Keywords,
    Flashcards,
    Quiz,
    Notes,
    Presentation,
    Definitions,
    TeacherExplanation,
    Script,
    Report,
    Comparison,
    Insights,
    LegalScan,
    AiDetection,
    Translation,
    Cleanup,
    ChartData,
    TopicBreakdown,
    Qa,
}

impl ResultKind {
    /// The `type` tag value this kind serialises to.
    pub fn tag(self) -> &'static str {
        match self {
            ResultKind::Summary => "summary",
            ResultKind::BulletSummary => "bullet_summary",
            ResultKind::Keywords => "keywords",
            ResultKind::Flashcards => "flashcards",
            ResultKind::Quiz => "quiz",
            ResultKind::Notes => "notes",
            ResultKind::Presentation => "presentation",
            ResultKind::Definitions => "definitions",
            ResultKind::TeacherExplanation => "teacher_explanation",
            ResultKind::Script => "script",
            ResultKind::Report => "report",
            ResultKind::Comparison => "comparison",
            ResultKind::Insights => "insights",
            ResultKind::LegalScan => "legal_scan",
            ResultKind::AiDetection => "ai_detection",
            ResultKind::Translation => "translation",
            ResultKind::Cleanup => "cleanup",
            ResultKind::ChartData => "chart_data",
            ResultKind::TopicBreakdown => "topic_breakdown",
            ResultKind::Qa => "qa",
        }
    }
}

impl std::fmt::Display for ResultKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Typed result union over all JSON-shaped operation outputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StructuredResult {
    /// Prose summary with optional key points.
    Summary {
        summary: String,
        #[serde(default)]
        key_points: Vec<String>,
    },

    /// Flat bullet-point summary.
    BulletSummary { bullets: Vec<String> },

    /// Extracted keywords, most relevant first.
    Keywords { keywords: Vec<String> },

    /// Study flashcards.
    Flashcards { cards: Vec<Flashcard> },

    /// Multiple-choice quiz.
    Quiz { questions: Vec<QuizQuestion> },

    /// Sectioned study notes.
    Notes { sections: Vec<NoteSection> },

    /// Slide deck outline.
    Presentation { title: String, slides: Vec<Slide> },

    /// Term/definition glossary.
    Definitions { entries: Vec<Definition> },

    /// Step-by-step explanation in a teaching register.
    TeacherExplanation {
        explanation: String,
        #[serde(default)]
        analogies: Vec<String>,
    },

    /// Narration/video script.
    Script {
        title: String,
        sections: Vec<ScriptSection>,
    },

    /// Formal report with headed sections.
    Report {
        title: String,
        sections: Vec<ReportSection>,
    },

    /// Multi-document comparison.
    Comparison {
        similarities: Vec<String>,
        differences: Vec<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        verdict: Option<String>,
    },

    /// Trend and insight extraction.
    Insights {
        insights: Vec<Insight>,
        #[serde(default)]
        trends: Vec<String>,
    },

    /// Contract/legal risk scan.
    LegalScan {
        risks: Vec<LegalRisk>,
        overall_risk: String,
    },

    /// AI-authorship estimate.
    AiDetection {
        /// 0.0–1.0 likelihood the text is machine-generated.
        ai_probability: f64,
        verdict: String,
        #[serde(default)]
        indicators: Vec<String>,
    },

    /// Translated text.
    Translation { language: String, text: String },

    /// Cleaned-up text with a change log.
    Cleanup {
        text: String,
        #[serde(default)]
        changes: Vec<String>,
    },

    /// Chartable data series extracted from the document.
    ChartData {
        chart_type: String,
        labels: Vec<String>,
        series: Vec<ChartSeries>,
    },

    /// Weighted topic decomposition.
    TopicBreakdown { topics: Vec<Topic> },

    /// Question answered against the document.
    Qa {
        answer: String,
        #[serde(default)]
        quotes: Vec<String>,
    },
}

impl StructuredResult {
    /// The discriminator this value carries.
    pub fn kind(&self) -> ResultKind {
        match self {
            Self::Summary { .. } => ResultKind::Summary,
            Self::BulletSummary { .. } => ResultKind::BulletSummary,
            Self::Keywords { .. } => ResultKind::Keywords,
            Self::Flashcards { .. } => ResultKind::Flashcards,
            Self::Quiz { .. } => ResultKind::Quiz,
            Self::Notes { .. } => ResultKind::Notes,
            Self::Presentation { .. } => ResultKind::Presentation,
            Self::Definitions { .. } => ResultKind::Definitions,
            Self::TeacherExplanation { .. } => ResultKind::TeacherExplanation,
            Self::Script { .. } => ResultKind::Script,
            Self::Report { .. } => ResultKind::Report,
            Self::Comparison { .. } => ResultKind::Comparison,
            Self::Insights { .. } => ResultKind::Insights,
            Self::LegalScan { .. } => ResultKind::LegalScan,
            Self::AiDetection { .. } => ResultKind::AiDetection,
            Self::Translation { .. } => ResultKind::Translation,
            Self::Cleanup { .. } => ResultKind::Cleanup,
            Self::ChartData { .. } => ResultKind::ChartData,
            Self::TopicBreakdown { .. } => ResultKind::TopicBreakdown,
            Self::Qa { .. } => ResultKind::Qa,
        }
    }
}

/// A single front/back flashcard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub front: String,
    pub back: String,
}

/// A multiple-choice question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub choices: Vec<String>,
    /// Index into `choices` of the correct answer.
    pub answer_index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// A headed group of note points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteSection {
    pub heading: String,
    pub points: Vec<String>,
}

/// One slide in a presentation outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    pub title: String,
    pub bullets: Vec<String>,
}

/// A glossary entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    pub term: String,
    pub definition: String,
}

/// One section of a narration script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    pub text: String,
}

/// One headed body section of a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSection {
    pub heading: String,
    pub body: String,
}

/// A single extracted insight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    pub title: String,
    pub detail: String,
}

/// One flagged clause in a legal scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalRisk {
    pub clause: String,
    /// "low" | "medium" | "high" as reported by the model.
    pub severity: String,
    pub explanation: String,
}

/// One named series in chart data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub name: String,
    pub values: Vec<f64>,
}

/// One weighted topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub name: String,
    /// Relative share of the document, 0.0–1.0.
    pub weight: f64,
    #[serde(default)]
    pub subtopics: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_matches_kind_for_every_variant() {
        let samples: Vec<StructuredResult> = vec![
            StructuredResult::Summary {
                summary: "s".into(),
                key_points: vec![],
            },
            StructuredResult::LegalScan {
                risks: vec![],
                overall_risk: "low".into(),
            },
            StructuredResult::Qa {
                answer: "a".into(),
                quotes: vec![],
            },
        ];
        for sample in samples {
            let json = serde_json::to_value(&sample).unwrap();
            assert_eq!(json["type"], sample.kind().tag());
        }
    }

    #[test]
    fn tagged_round_trip() {
        let original = StructuredResult::Quiz {
            questions: vec![QuizQuestion {
                question: "2+2?".into(),
                choices: vec!["3".into(), "4".into()],
                answer_index: 1,
                explanation: None,
            }],
        };
        let json = serde_json::to_string(&original).unwrap();
        let back: StructuredResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, original);
        assert_eq!(back.kind(), ResultKind::Quiz);
    }

    #[test]
    fn optional_collections_default_empty() {
        let json = r#"{"type": "ai_detection", "ai_probability": 0.9, "verdict": "likely AI"}"#;
        let parsed: StructuredResult = serde_json::from_str(json).unwrap();
        match parsed {
            StructuredResult::AiDetection { indicators, .. } => assert!(indicators.is_empty()),
            other => panic!("wrong variant: {other:?}"),
        }
    }
}
