use lazy_static::lazy_static;
use regex::Regex;
use serde::de::DeserializeOwned;

use super::LlmResponse;

lazy_static! {
    /// Markdown code fence markers, with or without a `json` tag
    static ref CODE_FENCE_RE: Regex = Regex::new(r"```(?:json)?\n?").unwrap();

    /// Regex for trailing commas before } or ]
    static ref TRAILING_COMMA_RE: Regex = Regex::new(r",(\s*[}\]])").unwrap();
}

/// Remove markdown code fences wrapped around a model reply
///
/// Example: "```json\n{\"a\": 1}\n```" -> "{\"a\": 1}"
pub fn strip_code_fences(text: &str) -> String {
    CODE_FENCE_RE.replace_all(text, "").trim().to_string()
}

/// Fix trailing commas in JSON (common LLM mistake)
///
/// Example: `{"name": "John",}` -> `{"name": "John"}`
pub fn fix_trailing_commas(json_str: &str) -> String {
    TRAILING_COMMA_RE.replace_all(json_str, "$1").to_string()
}

/// Locate the outermost JSON object or array embedded in surrounding prose
fn extract_embedded_json(text: &str) -> Option<&str> {
    let start = text.find(['{', '['])?;
    let closing = if text[start..].starts_with('{') { '}' } else { ']' };
    let end = text.rfind(closing)?;
    (start < end).then(|| &text[start..=end])
}

/// Parse a model reply as JSON.
///
/// Parsing pipeline:
/// 1. Strip code fences and try a direct parse
/// 2. Retry after removing trailing commas
/// 3. Retry on the object/array embedded in surrounding text
pub fn parse_json<T>(text: &str) -> Result<T, String>
where
    T: DeserializeOwned,
{
    let json_str = strip_code_fences(text);

    if let Ok(parsed) = serde_json::from_str::<T>(&json_str) {
        return Ok(parsed);
    }

    let fixed = fix_trailing_commas(&json_str);
    if let Ok(parsed) = serde_json::from_str::<T>(&fixed) {
        tracing::debug!("JSON parsed after removing trailing commas");
        return Ok(parsed);
    }

    if let Some(embedded) = extract_embedded_json(&fixed) {
        if let Ok(parsed) = serde_json::from_str::<T>(embedded) {
            tracing::debug!("JSON parsed from embedded block");
            return Ok(parsed);
        }
    }

    Err(format!(
        "Invalid AI response format: {}",
        json_str.chars().take(200).collect::<String>()
    ))
}

/// Parse LLM response text with graceful fallback
///
/// If every parsing attempt fails, returns `T::default()` marked as a
/// fallback with the error message attached.
pub fn parse_with_fallback<T>(text: &str) -> T
where
    T: LlmResponse,
{
    match parse_json::<T>(text) {
        Ok(parsed) => parsed,
        Err(error_msg) => {
            tracing::warn!("LLM response parsing failed, using fallback: {}", error_msg);
            let mut fallback = T::default();
            fallback.mark_as_fallback(error_msg);
            fallback
        }
    }
}
