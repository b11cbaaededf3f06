//! Validation of generation service replies.
//!
//! A completion is trusted only once it parses as a JSON array whose elements are all non-empty
//! strings. The one leniency is a single Markdown code fence around the array, which hosted
//! models emit even when told not to.

use crate::{AssistError, AssistResult};
use serde_json::Value;

/// Validate a raw completion into an ordered condition list.
///
/// An empty array is a valid reply and yields an empty list.
///
/// # Errors
/// Returns [`AssistError::SchemaMismatch`] if:
/// - the completion is not valid JSON,
/// - the JSON value is not an array,
/// - any element is not a string, or
/// - any element is empty or whitespace-only.
pub fn validate_condition_list(raw: &str) -> AssistResult<Vec<String>> {
    let body = strip_code_fence(raw);

    let value: Value = serde_json::from_str(body)
        .map_err(|e| AssistError::SchemaMismatch(format!("completion is not valid JSON: {e}")))?;

    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(AssistError::SchemaMismatch(format!(
                "expected a JSON array of strings, found {}",
                json_kind(&other)
            )))
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::String(s) if !s.trim().is_empty() => Ok(s),
            Value::String(_) => Err(AssistError::SchemaMismatch(format!(
                "element {index} is an empty string"
            ))),
            other => Err(AssistError::SchemaMismatch(format!(
                "element {index} is {}, expected a string",
                json_kind(&other)
            ))),
        })
        .collect()
}

/// Strip surrounding whitespace and one enclosing ``` fence (with optional language tag).
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(after_open) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(inner) = after_open.strip_suffix("```") else {
        return trimmed;
    };
    match inner.split_once('\n') {
        Some((first, rest)) if is_language_tag(first) => rest.trim(),
        _ => inner.trim(),
    }
}

/// A fence info string such as `json` or `json5`; never part of the payload.
fn is_language_tag(line: &str) -> bool {
    let line = line.trim();
    !line.is_empty()
        && line
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod validation_tests {
    use super::*;

    fn assert_schema_mismatch(raw: &str) {
        let err = validate_condition_list(raw).expect_err("expected schema mismatch");
        assert!(
            matches!(err, AssistError::SchemaMismatch(_)),
            "unexpected error for {raw:?}: {err:?}"
        );
    }

    #[test]
    fn accepts_array_of_strings_in_order() {
        let conditions =
            validate_condition_list(r#"["Common cold", "Influenza"]"#).expect("valid list");
        assert_eq!(conditions, vec!["Common cold", "Influenza"]);
    }

    #[test]
    fn empty_array_is_success() {
        let conditions = validate_condition_list("[]").expect("empty list is valid");
        assert!(conditions.is_empty());
    }

    #[test]
    fn duplicates_are_preserved() {
        let conditions =
            validate_condition_list(r#"["Migraine", "Migraine"]"#).expect("valid list");
        assert_eq!(conditions, vec!["Migraine", "Migraine"]);
    }

    #[test]
    fn tolerates_whitespace_and_code_fence() {
        let fenced = "\n```json\n[\"Strep throat\", \"Tonsillitis\"]\n```\n";
        assert_eq!(
            validate_condition_list(fenced).expect("fenced list"),
            vec!["Strep throat", "Tonsillitis"]
        );

        let bare_fence = "```[\"Anaemia\"]```";
        assert_eq!(
            validate_condition_list(bare_fence).expect("bare fence"),
            vec!["Anaemia"]
        );

        let untagged_multiline = "```[\"Flu\",\n\"Cold\"]```";
        assert_eq!(
            validate_condition_list(untagged_multiline).expect("untagged fence"),
            vec!["Flu", "Cold"]
        );

        let untagged_on_next_line = "```\n[\"Gastritis\"]\n```";
        assert_eq!(
            validate_condition_list(untagged_on_next_line).expect("fence on its own line"),
            vec!["Gastritis"]
        );
    }

    #[test]
    fn rejects_non_json_text() {
        assert_schema_mismatch("You might have a cold or the flu.");
        assert_schema_mismatch("");
        assert_schema_mismatch("```json\n[\"Unclosed\"]");
    }

    #[test]
    fn rejects_object_instead_of_array() {
        assert_schema_mismatch(r#"{"possibleConditions": ["Common cold"]}"#);
    }

    #[test]
    fn rejects_non_string_elements() {
        assert_schema_mismatch("[1, 2]");
        assert_schema_mismatch(r#"["Asthma", null]"#);
        assert_schema_mismatch(r#"[["Nested"]]"#);
    }

    #[test]
    fn rejects_empty_string_elements() {
        assert_schema_mismatch(r#"["Bronchitis", "  "]"#);
    }

    #[test]
    fn rejects_scalar_json() {
        assert_schema_mismatch(r#""Common cold""#);
        assert_schema_mismatch("null");
    }
}
