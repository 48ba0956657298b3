// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting fragments.

/// Opening line of every stylist prompt.
pub const ORACLE_PERSONA: &str = "You are The Oracle — an emotionally intelligent stylist";

/// Output rule shared by the archetype and suggestion prompts.
pub const PROSE_ONLY_INSTRUCTION: &str =
    "No markdown. No bullet points. No asterisks. No headers.";

/// System prompt for image description.
pub const VISION_SYSTEM: &str = "You are a structured visual fashion assistant.";

/// Substitutes `{key}` placeholders in one left-to-right pass. Inserted
/// values are never scanned again, so braces in user text stay literal.
/// Braces that do not name a known key are copied as-is.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start + 1..];
        let filled = tail.find('}').and_then(|end| {
            let key = &tail[..end];
            values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, value)| (*value, end + 1))
        });
        match filled {
            Some((value, consumed)) => {
                out.push_str(value);
                rest = &tail[consumed..];
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}
