//! Structured output parsing: fence stripping, tag injection, tolerant
//! deserialisation.
//!
//! Models frequently wrap JSON in Markdown code fences despite being told
//! not to; the parser strips one leading and one trailing fence line
//! before parsing. The `type` discriminator is injected from the
//! operation's registered [`ResultKind`] — model output never chooses its
//! own variant. Every failure path is non-fatal: a warning is logged, the
//! caller keeps the raw text.

use serde_json::Value;
use tracing::warn;

use crate::telemetry;
use crate::types::{ResultKind, StructuredResult};

/// Parse raw model output into the structured shape for `kind`.
///
/// Returns `None` (after a `warn!` and a parse-failure metric) when the
/// output is not valid JSON, is not an object, or does not match the
/// variant's fields. The raw text result remains valid either way.
pub fn parse_structured(kind: ResultKind, operation: &str, raw: &str) -> Option<StructuredResult> {
    let stripped = strip_code_fences(raw);

    let value: Value = match serde_json::from_str(stripped) {
        Ok(value) => value,
        Err(error) => {
            record_failure(operation, kind, &format!("invalid JSON: {error}"));
            return None;
        }
    };

    let Value::Object(mut object) = value else {
        record_failure(operation, kind, "top-level value is not an object");
        return None;
    };

    // The discriminator comes from the registry, never from the model.
    object.insert("type".to_owned(), Value::String(kind.tag().to_owned()));

    match serde_json::from_value::<StructuredResult>(Value::Object(object)) {
        Ok(result) => Some(result),
        Err(error) => {
            record_failure(operation, kind, &format!("shape mismatch: {error}"));
            None
        }
    }
}

fn record_failure(operation: &str, kind: ResultKind, detail: &str) {
    warn!(
        operation,
        kind = kind.tag(),
        detail,
        "structured output parse failed, returning raw text only"
    );
    metrics::counter!(telemetry::PARSE_FAILURES_TOTAL, "operation" => operation.to_owned())
        .increment(1);
}

/// Strip one leading and one trailing Markdown code fence, if present.
///
/// Handles ```` ```json ```` and bare ```` ``` ```` fences. Content
/// without fences passes through untouched.
fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the rest of the fence line (e.g. the "json" language tag).
    let body = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => return trimmed,
    };
    body.trim_end()
        .strip_suffix("```")
        .map_or(body, str::trim)
        .trim()
}
