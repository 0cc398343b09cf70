use serde::de::DeserializeOwned;

/// Parses a JSON value out of a model reply.
///
/// Models often wrap JSON in a fenced code block or surround it with prose, so
/// this tries, in order: the whole trimmed text, the first fenced block, and the
/// span from the first `{` to the last `}`. The error from the first attempt is
/// returned if nothing parses.
pub fn extract_json<T: DeserializeOwned>(text: &str) -> Result<T, serde_json::Error> {
    let trimmed = text.trim();
    let first_err = match serde_json::from_str(trimmed) {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };

    let candidates = [fenced_block(trimmed), brace_span(trimmed)];
    for candidate in candidates.into_iter().flatten() {
        if let Ok(value) = serde_json::from_str(candidate) {
            return Ok(value);
        }
    }

    Err(first_err)
}

fn fenced_block(text: &str) -> Option<&str> {
    let start = text.find("```")?;
    let after = &text[start + 3..];
    // skip an optional language tag on the opening fence
    let body_start = after.find('\n')? + 1;
    let body = &after[body_start..];
    let end = body.find("```")?;
    Some(body[..end].trim())
}

fn brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}
