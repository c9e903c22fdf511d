//! Helpers for pulling usable text out of a Gemini `generateContent`
//! response.

/// Concatenate the text parts of the first candidate.
///
/// Returns `None` when the response carries no candidate or no text.
pub fn extract_candidate_text(body: &serde_json::Value) -> Option<String> {
    let parts = body["candidates"][0]["content"]["parts"].as_array()?;
    let text: String = parts
        .iter()
        .filter_map(|part| part["text"].as_str())
        .collect();

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Clean model output for display.
///
/// Drops a markdown fence around the whole answer (language tag or not),
/// then the quotes the model tends to echo from the prompt's
/// `Original Message: "..."` line.
pub fn clean_model_text(text: &str) -> String {
    let mut lines: Vec<&str> = text.trim().lines().collect();
    if lines.first().is_some_and(|line| line.starts_with("```")) {
        lines.remove(0);
        if lines.last().is_some_and(|line| line.trim_end() == "```") {
            lines.pop();
        }
    }

    let body = lines.join("\n");
    let body = body.trim();
    body.strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(body)
        .trim()
        .to_string()
}
