use serde_json::Value;

/// Returned for bodies that are neither a string nor an object
pub const UNEXPECTED_FORMAT: &str = "Received response in an unexpected format.";

/// Keys checked, in order, for the answer text of an object body
const ANSWER_KEYS: [&str; 3] = ["response", "message", "answer"];

/// Extract display text from a decoded response body.
///
/// Strings pass through. Objects yield the first non-empty value under
/// `response`, `message` or `answer`, falling back to the whole object as
/// compact JSON. Every other shape yields [`UNEXPECTED_FORMAT`].
pub fn normalize_response(body: &Value) -> String {
    match body {
        Value::String(text) => text.clone(),
        Value::Object(map) => ANSWER_KEYS
            .iter()
            .filter_map(|key| map.get(*key))
            .find(|value| !is_empty_value(value))
            .map(value_to_text)
            .unwrap_or_else(|| body.to_string()),
        Value::Number(_) | Value::Bool(_) | Value::Null | Value::Array(_) => {
            UNEXPECTED_FORMAT.to_string()
        }
    }
}

/// `null`, `false`, zero and `""` count as absent
fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
