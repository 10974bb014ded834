//! # Response Validator
//!
//! Pure structural checks over the provider's parsed JSON payload. The
//! validator only reports violations; whether a violation demotes the outcome
//! to a failure is decided by the caller's [`ValidationPolicy`].

use serde_json::Value;

/// How a payload that parses but violates its structural contract is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationPolicy {
    /// Violations demote the outcome to a failure; the payload is excluded
    /// from the merge and the violations become the error text.
    #[default]
    Strict,
    /// Violations are logged and the payload is merged anyway.
    Lenient,
}

/// Checks a parsed task result against its required shape.
///
/// Returns one message per violation; an empty list means the payload is
/// valid. No side effects, no network access.
pub fn validate_payload(payload: &Value, required_keys: &[&str]) -> Vec<String> {
    let mut violations = Vec::new();

    let Some(object) = payload.as_object() else {
        violations.push("result is not a JSON object".to_string());
        return violations;
    };

    for key in required_keys {
        if !object.contains_key(*key) {
            violations.push(format!("missing required key `{key}`"));
        }
    }

    if let Some(confidence) = object.get("confidence") {
        match confidence.as_f64() {
            Some(value) if (0.0..=1.0).contains(&value) => {}
            Some(value) => {
                violations.push(format!("`confidence` {value} is outside [0, 1]"));
            }
            None => violations.push("`confidence` is not a number".to_string()),
        }
    }

    if let Some(notes) = object.get("notes") {
        match notes.as_array() {
            Some(items) => {
                for (index, item) in items.iter().enumerate() {
                    if !item.is_string() {
                        violations.push(format!("`notes[{index}]` is not a string"));
                    }
                }
            }
            None => violations.push("`notes` is not an array".to_string()),
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const KEYS: &[&str] = &["confidence", "notes", "head"];

    #[test]
    fn valid_payload_has_no_violations() {
        let payload = json!({
            "confidence": 0.8,
            "notes": ["rewrote title"],
            "head": {"title": "A"}
        });
        assert!(validate_payload(&payload, KEYS).is_empty());
    }

    #[test]
    fn missing_keys_are_each_reported() {
        let payload = json!({"confidence": 0.5});
        let violations = validate_payload(&payload, KEYS);
        assert_eq!(violations.len(), 2);
        assert!(violations.iter().any(|v| v.contains("`notes`")));
        assert!(violations.iter().any(|v| v.contains("`head`")));
    }

    #[test]
    fn out_of_range_confidence_is_reported() {
        let payload = json!({"confidence": 1.5, "notes": [], "head": {}});
        let violations = validate_payload(&payload, KEYS);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].contains("outside [0, 1]"));
    }

    #[test]
    fn boundary_confidences_are_valid() {
        for value in [0.0, 1.0] {
            let payload = json!({"confidence": value, "notes": [], "head": {}});
            assert!(validate_payload(&payload, KEYS).is_empty(), "value {value}");
        }
    }

    #[test]
    fn non_string_notes_are_reported_per_item() {
        let payload = json!({"confidence": 0.5, "notes": ["ok", 42, null], "head": {}});
        let violations = validate_payload(&payload, KEYS);
        assert_eq!(violations.len(), 2);
        assert!(violations[0].contains("notes[1]"));
        assert!(violations[1].contains("notes[2]"));
    }

    #[test]
    fn non_object_payload_short_circuits() {
        let violations = validate_payload(&json!([1, 2, 3]), KEYS);
        assert_eq!(violations, vec!["result is not a JSON object".to_string()]);
    }
}
