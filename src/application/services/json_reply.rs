//! Locating and parsing the JSON payload of a model reply.
//!
//! Models often wrap JSON in markdown fences or surround it with prose; the
//! payload is isolated before it reaches serde.

use serde::de::DeserializeOwned;

/// Reply did not contain JSON of the expected shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Failed to parse LLM reply: {0}")]
pub struct ReplyError(pub String);

/// Parses the JSON payload of `reply` into `T`.
pub fn parse_reply<T: DeserializeOwned>(reply: &str) -> Result<T, ReplyError> {
    serde_json::from_str(extract_json(reply)).map_err(|e| ReplyError(e.to_string()))
}

/// Returns the JSON slice of a reply.
///
/// Fenced code blocks win; otherwise the first balanced object or array that
/// is valid JSON, skipping brackets that belong to prose; otherwise the
/// trimmed reply as-is.
pub fn extract_json(reply: &str) -> &str {
    let trimmed = reply.trim();

    if let Some(json) = from_code_block(trimmed) {
        return json;
    }

    trimmed
        .char_indices()
        .filter_map(|(start, c)| match c {
            '{' => balanced(trimmed, start, '{', '}'),
            '[' => balanced(trimmed, start, '[', ']'),
            _ => None,
        })
        .find(|candidate| serde_json::from_str::<serde_json::Value>(candidate).is_ok())
        .unwrap_or(trimmed)
}

fn from_code_block(s: &str) -> Option<&str> {
    const FENCES: [&str; 4] = ["```json\n", "```json\r\n", "```\n", "```\r\n"];

    FENCES.iter().find_map(|fence| {
        let start = s.find(fence)? + fence.len();
        let end = s[start..].find("```")?;
        Some(s[start..start + end].trim())
    })
}

fn balanced(s: &str, start: usize, open: char, close: char) -> Option<&str> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (offset, c) in s[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match c {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            _ if in_string => {}
            c if c == open => depth += 1,
            c if c == close => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(&s[start..start + offset + c.len_utf8()]);
                }
            }
            _ => {}
        }
    }
    None
}
