//! Best-effort extraction of a JSON document from free-form model text.
//!
//! Structured output keeps replies clean, but models still wrap JSON in
//! prose or code fences often enough that parsing scans for the outermost
//! object or array instead of trusting the whole reply.

use diffmap_core::{DiffmapError, Result};
use serde::de::DeserializeOwned;

/// Returns the outermost JSON object or array embedded in `text`.
pub fn extract_json(text: &str) -> Result<&str> {
    let object = span(text, '{', '}');
    let array = span(text, '[', ']');

    let picked = match (object, array) {
        (Some(o), Some(a)) => {
            if o.0 < a.0 {
                Some(o)
            } else {
                Some(a)
            }
        }
        (Some(o), None) => Some(o),
        (None, Some(a)) => Some(a),
        (None, None) => None,
    };

    match picked {
        Some((start, end)) => Ok(&text[start..end]),
        None => Err(DiffmapError::MalformedOutput(
            "no JSON object or array found in model reply".to_string(),
        )),
    }
}

/// Extracts and deserializes in one step; any failure is a malformed-output
/// error, never a crash.
pub fn parse_json_reply<T: DeserializeOwned>(text: &str) -> Result<T> {
    let raw = extract_json(text)?;
    serde_json::from_str(raw).map_err(|e| DiffmapError::MalformedOutput(e.to_string()))
}

fn span(text: &str, open: char, close: char) -> Option<(usize, usize)> {
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    if end > start { Some((start, end + close.len_utf8())) } else { None }
}
