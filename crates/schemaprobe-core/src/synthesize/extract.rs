/// Recovery of a schema object from free-form oracle output.
///
/// Oracles asked for JSON still sometimes wrap it in a Markdown code fence.
/// [`extract_json`] accepts either a fenced block (with or without a `json`
/// info string) or bare JSON text; anything else is an [`ExtractError`].
use std::sync::LazyLock;

use regex::Regex;

use crate::schema::Schema;

/// Captures the body of the first fenced code block.
static FENCED_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?s)```(?:json|JSON)?[ \t]*\r?\n?(.*?)```").ok());

/// Reasons an oracle response could not be turned into a schema.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The response contained no text.
    #[error("response is empty")]
    Empty,
    /// The text is not valid JSON.
    #[error("response is not valid JSON: {0}")]
    Json(#[source] serde_json::Error),
    /// The JSON is valid but is not a JSON object.
    #[error("response JSON is not an object")]
    NotAnObject,
    /// The JSON object does not have the schema shape.
    #[error("response JSON does not match the schema shape: {0}")]
    Shape(#[source] serde_json::Error),
}

/// Returns the JSON payload of `text`: the first fenced block if present,
/// otherwise the trimmed text itself.
pub fn json_payload(text: &str) -> &str {
    if let Some(re) = FENCED_RE.as_ref() {
        if let Some(body) = re.captures(text).and_then(|c| c.get(1)) {
            return body.as_str().trim();
        }
    }
    text.trim()
}

/// Parses an oracle response into a JSON object.
pub fn extract_json(text: &str) -> Result<serde_json::Value, ExtractError> {
    let payload = json_payload(text);
    if payload.is_empty() {
        return Err(ExtractError::Empty);
    }
    let value: serde_json::Value = serde_json::from_str(payload).map_err(ExtractError::Json)?;
    if !value.is_object() {
        return Err(ExtractError::NotAnObject);
    }
    Ok(value)
}

/// Parses an oracle response into a [`Schema`].
pub fn parse_schema(text: &str) -> Result<Schema, ExtractError> {
    let value = extract_json(text)?;
    serde_json::from_value(value).map_err(ExtractError::Shape)
}
