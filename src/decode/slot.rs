//! Typed access to untyped provider values.
//!
//! Every read goes through these helpers so a missing or wrong-typed value
//! falls back to a neutral default: `""` for text, `0` for numbers, `false`
//! for flags and an empty slice for sequences. JSON `null` counts as missing.

use serde_json::Value;

/// Positional slot `idx` of a record
pub fn at(record: &[Value], idx: usize) -> Option<&Value> {
    record.get(idx).filter(|v| !v.is_null())
}

/// Named member of a keyed record
pub fn field<'a>(record: &'a Value, name: &str) -> Option<&'a Value> {
    record.get(name).filter(|v| !v.is_null())
}

/// Text value; numbers are rendered the way the provider prints them
pub fn text(value: Option<&Value>) -> String {
    text_or(value, "")
}

/// Text value with a fallback for missing, empty or wrong-typed input
pub fn text_or(value: Option<&Value>, fallback: &str) -> String {
    match value {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => fallback.to_string(),
    }
}

pub fn number(value: Option<&Value>) -> f64 {
    value.and_then(Value::as_f64).unwrap_or(0.0)
}

/// Integer value, truncating fractional numbers; `None` unless numeric
pub fn integer(value: Option<&Value>) -> Option<i64> {
    let value = value?;
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.is_finite())
            .map(|f| f.trunc() as i64)
    })
}

pub fn flag(value: Option<&Value>) -> bool {
    value.and_then(Value::as_bool).unwrap_or(false)
}

pub fn list(value: Option<&Value>) -> &[Value] {
    match value {
        Some(Value::Array(items)) => items,
        _ => &[],
    }
}

/// Integer wrapped in a single-element array, e.g. `[1741599600]`
pub fn boxed_integer(value: Option<&Value>) -> Option<i64> {
    integer(list(value).first())
}

/// Sequence of numbers; a bare number is promoted to a one-element sequence
pub fn numbers(value: Option<&Value>) -> Vec<f64> {
    match value {
        Some(Value::Array(items)) => items.iter().map(|v| number(Some(v))).collect(),
        Some(v @ Value::Number(_)) => vec![number(Some(v))],
        _ => Vec::new(),
    }
}

/// Sequence of strings; a bare scalar is promoted to a one-element sequence
pub fn texts(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items.iter().map(|v| text(Some(v))).collect(),
        Some(v @ (Value::String(_) | Value::Number(_))) => vec![text(Some(v))],
        _ => Vec::new(),
    }
}

/// Sequence of flags; a bare boolean is promoted to a one-element sequence
pub fn flags(value: Option<&Value>) -> Vec<bool> {
    match value {
        Some(Value::Array(items)) => items.iter().map(|v| flag(Some(v))).collect(),
        Some(Value::Bool(b)) => vec![*b],
        _ => Vec::new(),
    }
}
