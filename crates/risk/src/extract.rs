//! Response extraction: locate a JSON array in free-form generator text.
//!
//! Failure here is signaled as [`InferenceError::Extraction`] so the engine
//! can fall back; it is never fatal to callers of the pipeline.

use serde_json::Value as JsonValue;

use crate::error::InferenceError;

/// Extract the candidate scenario array from raw response text.
///
/// Fenced code blocks (```json or bare ```) are stripped when present;
/// otherwise the whole text is treated as the candidate JSON.
pub fn extract_scenario_array(raw: &str) -> Result<Vec<JsonValue>, InferenceError> {
    let candidate = strip_fences(raw);

    let value: JsonValue = serde_json::from_str(candidate).map_err(|e| {
        InferenceError::Extraction(format!("response is not valid JSON: {e}"))
    })?;

    match value {
        JsonValue::Array(items) => Ok(items),
        _ => Err(InferenceError::Extraction(
            "response JSON is not an array".to_string(),
        )),
    }
}

fn strip_fences(raw: &str) -> &str {
    let trimmed = raw.trim();

    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Drop the (possibly labeled) opening fence line, then the closing fence.
    let body = match rest.split_once('\n') {
        Some((_label, body)) => body,
        None => rest,
    };
    let body = body.trim_end();
    let body = body.strip_suffix("```").unwrap_or(body);

    body.trim()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn bare_array_is_parsed() {
        let items = extract_scenario_array(r#"[{"asset": "X"}]"#).unwrap();
        assert_eq!(items, vec![json!({"asset": "X"})]);
    }

    #[test]
    fn labeled_fence_is_stripped() {
        let items = extract_scenario_array("```json\n[{\"asset\":\"X\"}]\n```").unwrap();
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn unlabeled_fence_is_stripped() {
        let items = extract_scenario_array("```\n[1, 2]\n```").unwrap();
        assert_eq!(items, vec![json!(1), json!(2)]);
    }

    #[test]
    fn surrounding_whitespace_is_tolerated() {
        let items = extract_scenario_array("\n\n  [ ]  \n").unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn garbage_is_an_extraction_error() {
        let err = extract_scenario_array("lo siento, no puedo ayudarte").unwrap_err();
        assert!(matches!(err, InferenceError::Extraction(_)));
    }

    #[test]
    fn non_array_json_is_an_extraction_error() {
        let err = extract_scenario_array(r#"{"scenarios": []}"#).unwrap_err();
        assert!(matches!(err, InferenceError::Extraction(_)));
    }

    #[test]
    fn prose_around_a_fence_is_tolerated_only_as_whitespace() {
        // A fence preceded by prose does not start with ```: the whole text
        // is the candidate and fails to parse.
        let err = extract_scenario_array("Aquí tienes:\n```json\n[]\n```").unwrap_err();
        assert!(matches!(err, InferenceError::Extraction(_)));
    }
}
