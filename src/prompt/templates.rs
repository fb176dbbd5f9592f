//! Per-operation instruction templates and JSON response contracts.
//!
//! Templates are data, not logic: each operation gets a fixed instruction
//! block, options fill in the few knobs callers control, and JSON-shaped
//! operations append the field contract for their result kind so the model
//! output deserialises into the matching [`StructuredResult`] variant
//! without post-hoc guessing.

use crate::types::{Difficulty, OperationOptions, ResultKind};

/// Instruction text for an operation id, with options woven in.
///
/// Unknown ids get a generic instruction — consistent with the registry's
/// degrade-don't-fail lookup.
pub(crate) fn instruction_for(id: &str, options: &OperationOptions) -> String {
    match id {
        "SUMMARY_SHORT" => "Summarize the document below in at most three sentences. \
             Plain prose, no headings, no bullet points. Preserve the author's \
             framing and any stated conclusion."
            .to_owned(),

        "SUMMARY_BULLETS" => "Summarize the document below as 5-10 bullet points. Each bullet is one \
             complete, standalone statement. Order bullets by importance, most \
             important first."
            .to_owned(),

        "SUMMARY_DETAILED" => {
            let focus = match options {
                OperationOptions::Summary { focus: Some(focus) } => {
                    format!(" Pay particular attention to: {focus}.")
                }
                _ => String::new(),
            };
            format!(
                "Write a detailed summary of the document below: one paragraph of \
                 connected prose plus the key points as a separate list. Cover every \
                 major section; do not introduce claims the document does not make.{focus}"
            )
        }

        "KEYWORDS" => "Extract the 10-20 most significant keywords and key phrases from the \
             document below. Prefer domain terms over generic vocabulary. Order \
             by relevance, most relevant first."
            .to_owned(),

        "DEFINITIONS" => "Identify the technical or domain-specific terms in the document below \
             and define each one in a single sentence, using only information the \
             document itself supports where possible."
            .to_owned(),

        "TRANSLATION" => {
            let language = match options {
                OperationOptions::Translation { target_language } => target_language.as_str(),
                _ => "English",
            };
            format!(
                "Translate the document below into {language}. Preserve paragraph \
                 structure, tone, and register. Do not summarize, annotate, or omit \
                 content. Keep proper nouns and citations as written."
            )
        }

        "TEXT_CLEANUP" => "Clean up the document below: fix spelling, grammar, and punctuation, \
             repair broken line wrapping and hyphenation from text extraction, and \
             normalize whitespace. Do not change wording, meaning, or order. List \
             the categories of changes you made."
            .to_owned(),

        "FLASHCARDS" => {
            let count = match options {
                OperationOptions::Flashcards { card_count } => *card_count,
                _ => 15,
            };
            format!(
                "Create {count} study flashcards from the document below. Each card \
                 has a short question or cue on the front and a concise factual \
                 answer on the back. Cover the document's breadth rather than \
                 repeating one topic."
            )
        }

        "TEST_GENERATOR" => {
            let (count, difficulty) = match options {
                OperationOptions::Quiz {
                    question_count,
                    difficulty,
                } => (*question_count, *difficulty),
                _ => (10, Difficulty::Medium),
            };
            let level = match difficulty {
                Difficulty::Easy => "recall of explicitly stated facts",
                Difficulty::Medium => "comprehension and application of the material",
                Difficulty::Hard => "analysis, synthesis, and edge cases of the material",
            };
            format!(
                "Write a {count}-question multiple-choice test on the document below, \
                 targeting {level}. Each question has exactly four choices with one \
                 correct answer, distractors that are plausible but clearly wrong, \
                 and a one-sentence explanation of the correct answer."
            )
        }

        "NOTES" => "Rewrite the document below as structured study notes: a heading per \
             major topic, with terse factual points under each. Keep formulas, \
             numbers, and names exact."
            .to_owned(),

        "PRESENTATION" => {
            let slides = match options {
                OperationOptions::Presentation { slide_count } => *slide_count,
                _ => 10,
            };
            format!(
                "Outline a {slides}-slide presentation of the document below. Give the \
                 deck a title, then for each slide a short title and 3-5 bullet \
                 points. The first slide introduces, the last concludes."
            )
        }

        "TEACHER_EXPLANATION" => "Explain the document below the way a patient teacher would to a \
             newcomer: plain language, build from what a beginner knows, and \
             include concrete analogies for the hardest ideas."
            .to_owned(),

        "SCRIPT" => "Turn the document below into a spoken narration script suitable for a \
             video or podcast: a title, then sections of natural spoken prose. \
             Write for the ear, not the page — short sentences, no citations."
            .to_owned(),

        "REPORT" => "Produce a formal report based on the document below: a report title, \
             then headed sections (background, findings, conclusions at minimum). \
             Neutral register; every claim traceable to the source."
            .to_owned(),

        "CHART_DATA" => "Extract the most chart-worthy quantitative data from the document \
             below. Choose the best chart type (bar, line, or pie), a label per \
             data point, and one or more named numeric series of equal length."
            .to_owned(),

        "TOPIC_BREAKDOWN" => "Break the document below into its constituent topics. For each topic \
             give a name, its approximate share of the document as a weight \
             between 0 and 1 (weights summing to roughly 1), and its subtopics."
            .to_owned(),

        "DOCUMENT_QA" => "Answer the user's question using only the document below. Quote the \
             passages that support the answer. If the document does not contain \
             the answer, say so explicitly rather than speculating."
            .to_owned(),

        "CONTRACT_LAW_SCAN" => "Review the contract below for legal risk. Flag every clause that is \
             unusual, one-sided, ambiguous, or commonly litigated; for each, \
             quote the clause, rate its severity as low, medium, or high, and \
             explain the exposure in plain language. Conclude with an overall \
             risk rating. This is an automated screening aid, not legal advice."
            .to_owned(),

        "AI_DETECTION" => "Assess whether the text below was machine-generated. Weigh burstiness, \
             repetition patterns, hedging density, and factual texture. Report a \
             probability between 0 and 1, a one-line verdict, and the concrete \
             indicators that drove the assessment."
            .to_owned(),

        "DOCUMENT_COMPARISON" => "The text below contains multiple documents separated by markers. \
             Compare them: list substantive similarities, list substantive \
             differences, and if one document is clearly stronger or more \
             current, say which and why."
            .to_owned(),

        "TREND_INSIGHTS" => "Analyse the document below for non-obvious insights and trends. Each \
             insight gets a short title and a supporting detail grounded in the \
             text. Separately list directional trends the data implies."
            .to_owned(),

        _ => "Process the document below according to the operation's intent and \
             respond concisely."
            .to_owned(),
    }
}

/// JSON field contract appended for a result kind.
///
/// Kept in lock-step with the [`StructuredResult`](crate::types::StructuredResult)
/// variants — the parser injects the `type` tag itself, so contracts
/// deliberately omit it.
pub(crate) fn json_contract(kind: ResultKind) -> &'static str {
    match kind {
        ResultKind::Summary => {
            r#"{"summary": "<prose summary>", "key_points": ["<point>", ...]}"#
        }
        ResultKind::BulletSummary => r#"{"bullets": ["<bullet>", ...]}"#,
        ResultKind::Keywords => r#"{"keywords": ["<keyword>", ...]}"#,
        ResultKind::Flashcards => {
            r#"{"cards": [{"front": "<question>", "back": "<answer>"}, ...]}"#
        }
        ResultKind::Quiz => {
            r#"{"questions": [{"question": "<text>", "choices": ["<a>", "<b>", "<c>", "<d>"], "answer_index": <0-3>, "explanation": "<why>"}, ...]}"#
        }
        ResultKind::Notes => {
            r#"{"sections": [{"heading": "<topic>", "points": ["<point>", ...]}, ...]}"#
        }
        ResultKind::Presentation => {
            r#"{"title": "<deck title>", "slides": [{"title": "<slide title>", "bullets": ["<bullet>", ...]}, ...]}"#
        }
        ResultKind::Definitions => {
            r#"{"entries": [{"term": "<term>", "definition": "<one sentence>"}, ...]}"#
        }
        ResultKind::TeacherExplanation => {
            r#"{"explanation": "<plain-language explanation>", "analogies": ["<analogy>", ...]}"#
        }
        ResultKind::Script => {
            r#"{"title": "<title>", "sections": [{"heading": "<optional heading>", "text": "<spoken prose>"}, ...]}"#
        }
        ResultKind::Report => {
            r#"{"title": "<report title>", "sections": [{"heading": "<heading>", "body": "<prose>"}, ...]}"#
        }
        ResultKind::Comparison => {
            r#"{"similarities": ["<similarity>", ...], "differences": ["<difference>", ...], "verdict": "<optional verdict>"}"#
        }
        ResultKind::Insights => {
            r#"{"insights": [{"title": "<title>", "detail": "<detail>"}, ...], "trends": ["<trend>", ...]}"#
        }
        ResultKind::LegalScan => {
            r#"{"risks": [{"clause": "<quoted clause>", "severity": "low|medium|high", "explanation": "<exposure>"}, ...], "overall_risk": "low|medium|high"}"#
        }
        ResultKind::AiDetection => {
            r#"{"ai_probability": <0.0-1.0>, "verdict": "<one line>", "indicators": ["<indicator>", ...]}"#
        }
        ResultKind::Translation => {
            r#"{"language": "<target language>", "text": "<translated text>"}"#
        }
        ResultKind::Cleanup => {
            r#"{"text": "<cleaned text>", "changes": ["<change category>", ...]}"#
        }
        ResultKind::ChartData => {
            r#"{"chart_type": "bar|line|pie", "labels": ["<label>", ...], "series": [{"name": "<series>", "values": [<number>, ...]}, ...]}"#
        }
        ResultKind::TopicBreakdown => {
            r#"{"topics": [{"name": "<topic>", "weight": <0.0-1.0>, "subtopics": ["<subtopic>", ...]}, ...]}"#
        }
        ResultKind::Qa => {
            r#"{"answer": "<answer>", "quotes": ["<supporting quote>", ...]}"#
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::OperationRegistry;

    #[test]
    fn every_builtin_operation_has_a_specific_instruction() {
        let registry = OperationRegistry::builtin();
        let generic = instruction_for("__UNKNOWN__", &OperationOptions::None);
        for descriptor in registry.iter() {
            let instruction = instruction_for(&descriptor.id, &OperationOptions::None);
            assert_ne!(instruction, generic, "{} fell through", descriptor.id);
        }
    }

    #[test]
    fn translation_options_reach_the_template() {
        let options = OperationOptions::Translation {
            target_language: "German".into(),
        };
        assert!(instruction_for("TRANSLATION", &options).contains("German"));
    }

    #[test]
    fn quiz_options_reach_the_template() {
        let options = OperationOptions::Quiz {
            question_count: 25,
            difficulty: Difficulty::Hard,
        };
        let instruction = instruction_for("TEST_GENERATOR", &options);
        assert!(instruction.contains("25-question"));
        assert!(instruction.contains("analysis"));
    }

    #[test]
    fn contracts_parse_shape_hint_fields() {
        // Contracts are prompts, not JSON, but the field names they mention
        // must match the serde field names of the target variant.
        assert!(json_contract(ResultKind::LegalScan).contains("overall_risk"));
        assert!(json_contract(ResultKind::Quiz).contains("answer_index"));
        assert!(json_contract(ResultKind::ChartData).contains("series"));
    }
}
