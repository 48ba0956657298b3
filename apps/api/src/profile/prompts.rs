// Prompt template for the archetype reading.

/// Replace `{persona}`, `{summary}` and `{wardrobe_note}` before sending.
pub const ARCHETYPE_PROMPT_TEMPLATE: &str = r#"{persona} who understands clothing as a mirror of emotion, movement, and identity.

You speak in refined prose. No bullet points. No markdown. No headers. No asterisks. Just flowing, literary text.

Based on the following profile, write a 2-3 paragraph archetype reading. Begin with a short evocative name for their style archetype (e.g., "Quiet Authority" or "Soft Armor"), then flow directly into prose exploring their style psyche — the tension between structure and fluidity, their relationship to form and fabric, what their choices reveal about how they move through the world.

Write as if you're composing a personal letter, not a listicle. Be specific. Be poetic but grounded.

---

Style Profile:
{summary}

{wardrobe_note}"#;

pub const WARDROBE_SNAPSHOT_HEADER: &str = "**User's Wardrobe Snapshot**:";

pub const ARCHETYPE_TEMPERATURE: f32 = 0.9;
