use crate::error::TrendsError;
use serde_json::Value;

/// Anti-hijacking guard prepended to every provider body
pub const GUARD: &str = ")]}'";

/// Slot of the first outer frame holding the JSON-encoded payload
const NESTED_SLOT: usize = 2;

/// Slot of the decoded payload holding the record array
const PAYLOAD_SLOT: usize = 1;

/// Remove the guard prefix (and the trailing comma some endpoints add) and trim.
///
/// Text without the guard is returned trimmed. Applying this twice yields the
/// same result as applying it once.
pub fn strip_guard(raw: &str) -> &str {
    let mut text = raw.trim();
    while let Some(rest) = text.strip_prefix(GUARD) {
        text = rest.strip_prefix(',').unwrap_or(rest).trim();
    }
    text
}

/// Unwrap a batch RPC body down to the record payload.
///
/// Level 1 is a non-empty array whose first frame carries the payload as a JSON
/// string; level 2 is that string parsed, an array of at least two elements.
pub fn unwrap_payload(raw: &str) -> Result<Value, TrendsError> {
    let text = strip_guard(raw);

    let level1: Value = serde_json::from_str(text)
        .map_err(|e| TrendsError::parse(format!("Failed to parse response: {}", e)))?;

    let frames = match level1.as_array() {
        Some(frames) if !frames.is_empty() => frames,
        _ => {
            return Err(TrendsError::parse(
                "Invalid response format: expected non-empty array",
            ))
        }
    };

    let nested = frames[0]
        .as_array()
        .and_then(|frame| frame.get(NESTED_SLOT))
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| TrendsError::parse("Invalid response format: missing nested JSON"))?;

    let level2: Value = serde_json::from_str(nested)
        .map_err(|e| TrendsError::parse(format!("Failed to parse nested payload: {}", e)))?;

    match level2 {
        Value::Array(mut data) if data.len() > PAYLOAD_SLOT => Ok(data.swap_remove(PAYLOAD_SLOT)),
        _ => Err(TrendsError::parse(
            "Invalid response format: missing data array",
        )),
    }
}

/// Parse a guard-prefixed JSON object body (explore, widget data, autocomplete)
pub fn read_document(raw: &str) -> Result<Value, TrendsError> {
    let text = strip_guard(raw);
    let doc: Value = serde_json::from_str(text)
        .map_err(|e| TrendsError::parse(format!("Failed to parse response: {}", e)))?;

    if !doc.is_object() {
        return Err(TrendsError::parse(
            "Invalid response format: expected JSON object",
        ));
    }
    Ok(doc)
}

/// Fetch `doc.default` as an object, the root of every widget data body
pub(crate) fn default_section(doc: &Value) -> Result<&Value, TrendsError> {
    doc.get("default")
        .filter(|v| v.is_object())
        .ok_or_else(|| TrendsError::parse("Invalid response format: missing 'default' object"))
}

/// Fetch an optional array member of a container; absent means empty, any other type is an error
pub(crate) fn container_array<'a>(
    section: &'a Value,
    name: &str,
) -> Result<&'a [Value], TrendsError> {
    match section.get(name) {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(TrendsError::parse(format!(
            "Invalid data format: '{}' is not an array",
            name
        ))),
    }
}
