/// Pull the JSON object out of free-form model text.
///
/// Models tend to wrap their JSON in Markdown code fences and sometimes
/// add prose around it. Strip the fences, then slice from the first `{`
/// to the last `}` inclusive. This is a heuristic, not a parser: when no
/// braces are present the whole stripped text comes back as-is, and the
/// result is returned to the client without validation.
pub fn extract_json(text: &str) -> String {
    let stripped = text.replace("```json", "").replace("```", "");
    let stripped = stripped.trim();

    match (stripped.find('{'), stripped.rfind('}')) {
        (Some(start), Some(end)) if end >= start => stripped[start..=end].to_string(),
        _ => stripped.to_string(),
    }
}
