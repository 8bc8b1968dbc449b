//! crates/bytementor_core/src/extract.rs
//!
//! Recovers a single JSON object from loosely formatted generator output.
//! Generators do not reliably honor "return ONLY JSON", so the object may be
//! surrounded by prose or wrapped in markdown code fences.

use serde_json::{Map, Value};

const FENCE: &str = "```";

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("no JSON object found in upstream text")]
    NoObject,
    #[error("malformed JSON object: {0}")]
    Malformed(String),
}

/// Extracts the object spanning the first `{` and the last `}` of `raw`
/// once code fences have been removed.
pub fn extract_json_object(raw: &str) -> Result<Map<String, Value>, ExtractError> {
    let cleaned = strip_code_fences(raw);
    let cleaned = cleaned.trim();

    let start = cleaned.find('{').ok_or(ExtractError::NoObject)?;
    let end = cleaned.rfind('}').ok_or(ExtractError::NoObject)?;
    if end < start {
        return Err(ExtractError::NoObject);
    }

    match serde_json::from_str::<Value>(&cleaned[start..=end]) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(ExtractError::Malformed(format!(
            "expected an object, found {}",
            type_name(&other)
        ))),
        Err(e) => Err(ExtractError::Malformed(e.to_string())),
    }
}

/// Removes every triple-backtick marker, together with a language tag and a
/// single newline directly following it.
fn strip_code_fences(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(pos) = rest.find(FENCE) {
        out.push_str(&rest[..pos]);
        rest = &rest[pos + FENCE.len()..];

        let tag_len = rest
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(rest.len());
        rest = &rest[tag_len..];
        rest = rest.strip_prefix('\n').unwrap_or(rest);
    }
    out.push_str(rest);
    out
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
