//! JSON Extraction & Repair
//!
//! Text-generation services are asked for JSON but return free-form
//! text. This module extracts a parseable value from the common failure
//! shapes:
//! - Markdown code fence wrapping (```json ... ```)
//! - Trailing commas
//! - Missing closing braces/brackets
//! - JSON embedded in explanatory prose
//!
//! Anything still unparseable after repair is an error the caller
//! treats as "no enrichment produced".

use serde_json::Value;
use tracing::{debug, warn};

use crate::types::{RepoLensError, Result};

/// Extract and parse JSON from an LLM response.
///
/// Primary entry point for consuming text-generation output.
pub fn extract_json_from_response(content: &str) -> Result<Value> {
    let cleaned = strip_code_fences(content.trim().trim_start_matches('\u{feff}'));

    if let Ok(value) = serde_json::from_str::<Value>(&cleaned) {
        return Ok(value);
    }

    debug!("direct JSON parse failed, attempting repair");

    let repaired = balance_brackets(&fix_trailing_commas(&cleaned));
    if let Ok(value) = serde_json::from_str::<Value>(&repaired) {
        warn!("LLM response JSON required repair");
        return Ok(value);
    }

    if let Some(embedded) = extract_embedded_json(&cleaned)
        && let Ok(value) = serde_json::from_str::<Value>(&embedded)
    {
        warn!("LLM response JSON extracted from surrounding text");
        return Ok(value);
    }

    Err(RepoLensError::llm(format!(
        "response is not valid JSON. Preview: {}",
        cleaned.chars().take(120).collect::<String>()
    )))
}

/// Strip a leading/trailing markdown code fence.
fn strip_code_fences(s: &str) -> String {
    let mut result = s.to_string();

    if result.starts_with("```")
        && let Some(first_newline) = result.find('\n')
    {
        result = result[first_newline + 1..].to_string();
    }
    if result.ends_with("```") {
        result = result[..result.len() - 3].trim_end().to_string();
    }

    result
}

/// Drop commas that directly precede a closing bracket or brace.
fn fix_trailing_commas(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len());

    for (i, &ch) in chars.iter().enumerate() {
        if ch == ',' {
            let next = chars[i + 1..].iter().find(|c| !c.is_whitespace());
            if matches!(next, Some(']') | Some('}')) {
                continue;
            }
        }
        result.push(ch);
    }

    result
}

/// Append missing closers for unbalanced braces/brackets, respecting
/// string literals.
fn balance_brackets(s: &str) -> String {
    let mut result = s.to_string();
    let mut braces = 0i32;
    let mut brackets = 0i32;
    let mut in_string = false;
    let mut escape = false;

    for ch in s.chars() {
        if escape {
            escape = false;
            continue;
        }
        match ch {
            '\\' if in_string => escape = true,
            '"' => in_string = !in_string,
            '{' if !in_string => braces += 1,
            '}' if !in_string => braces -= 1,
            '[' if !in_string => brackets += 1,
            ']' if !in_string => brackets -= 1,
            _ => {}
        }
    }

    if in_string {
        result.push('"');
    }
    for _ in 0..brackets.max(0) {
        result.push(']');
    }
    for _ in 0..braces.max(0) {
        result.push('}');
    }

    result
}

/// Pull the first balanced `{...}` span out of mixed prose.
fn extract_embedded_json(s: &str) -> Option<String> {
    let start = s.find('{')?;
    let mut depth = 0i32;
    let mut in_string = false;
    let mut escape = false;

    for (i, ch) in s[start..].char_indices() {
        if escape {
            escape = false;
            continue;
        }
        match ch {
            '\\' if in_string => escape = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(s[start..start + i + 1].to_string());
                }
            }
            _ => {}
        }
    }

    None
}
