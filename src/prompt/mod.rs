//! Prompt construction: instruction template + budgeted content.

mod templates;

use crate::registry::{OperationDescriptor, OutputShape};
use crate::types::OperationOptions;

/// Render the full prompt for an operation over (already budgeted) content.
///
/// JSON-shaped operations get the response contract for their result kind
/// appended so output deserialises into the registered
/// [`StructuredResult`](crate::types::StructuredResult) variant.
pub fn build_prompt(
    descriptor: &OperationDescriptor,
    options: &OperationOptions,
    content: &str,
) -> String {
    let instruction = templates::instruction_for(&descriptor.id, options);

    let mut prompt = String::with_capacity(instruction.len() + content.len() + 256);
    prompt.push_str(&instruction);

    if let OutputShape::Json(kind) = descriptor.output {
        prompt.push_str(
            "\n\nRespond with a single JSON object and nothing else, shaped exactly as:\n",
        );
        prompt.push_str(templates::json_contract(kind));
    }

    prompt.push_str("\n\n--- DOCUMENT ---\n");
    prompt.push_str(content);
    prompt.push_str("\n--- END DOCUMENT ---");
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::OperationRegistry;

    #[test]
    fn text_operations_omit_json_contract() {
        let registry = OperationRegistry::builtin();
        let summary = registry.get("SUMMARY_SHORT").unwrap();
        let prompt = build_prompt(summary, &OperationOptions::None, "doc text");
        assert!(!prompt.contains("JSON object"));
        assert!(prompt.contains("doc text"));
    }

    #[test]
    fn json_operations_include_contract() {
        let registry = OperationRegistry::builtin();
        let scan = registry.get("CONTRACT_LAW_SCAN").unwrap();
        let prompt = build_prompt(scan, &OperationOptions::None, "the contract");
        assert!(prompt.contains("single JSON object"));
        assert!(prompt.contains("overall_risk"));
        assert!(prompt.contains("the contract"));
    }

    #[test]
    fn content_is_delimited() {
        let registry = OperationRegistry::builtin();
        let notes = registry.get("NOTES").unwrap();
        let prompt = build_prompt(notes, &OperationOptions::None, "body");
        assert!(prompt.contains("--- DOCUMENT ---"));
        assert!(prompt.ends_with("--- END DOCUMENT ---"));
    }
}
