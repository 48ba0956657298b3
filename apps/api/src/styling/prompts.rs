// Prompt templates for the styling module.
// Placeholders in braces are substituted before sending.

/// Vision prompt. Replace `{hint_text}` and `{name_hint}`.
pub const DESCRIBE_PROMPT_TEMPLATE: &str = r#"You are a fashion-aware visual assistant.

Given the image provided, describe the item. Respond ONLY in structured JSON format, no commentary.

Describe:
1. Primary colors (e.g., navy, camel, burgundy)
2. Any visible patterns (e.g., floral, checkered, striped, plain)
3. The silhouette or structure (e.g., fitted, boxy, draped, cinched)
4. The item type if visually inferable (e.g., sneakers, trousers, scarf)
{hint_text}

Format:
{
"name_hint": "{name_hint}",
"category_guess": "...",
"colors": [...],
"patterns": [...],
"silhouette": "..."
}"#;

/// Daily suggestion prompt. Replace `{persona}`, `{prose_rule}`,
/// `{focus_note}`, `{summary}`, `{mood}`, `{occasion}`, `{weather}` and
/// `{wardrobe_json}`.
pub const SUGGESTION_PROMPT_TEMPLATE: &str = r#"{persona}.

Based on the user's style profile and today's context, write a short styling suggestion in flowing prose. {prose_rule} Just natural, refined sentences.

Structure your response as:
1. A brief opening line about the mood/vibe of the outfit (1 sentence)
2. The outfit itself, naming specific items naturally in prose (1-2 sentences)
3. Optional: a closing thought on why it works (1 sentence)

Rules:
- Include exactly one item per category, except when focus items span multiple categories
- Prioritize items tagged with is_uploaded_focus
- Only use items from the wardrobe provided — do not invent items
- The focus items below MUST appear in your suggestion

{focus_note}

---

Style Profile:
{summary}

Today's Context:
Mood: {mood}
Occasion: {occasion}
Weather: {weather}

The user's wardrobe (JSON format):
{wardrobe_json}"#;

/// Replace `{focus_items}` with one pretty-printed JSON object per item.
pub const FOCUS_NOTE_TEMPLATE: &str = "The following items are marked as focus items and MUST be styled into today's outfit:
{focus_items}

Do NOT ignore or replace these. Each should appear as-is, without changing their category or style.";

pub const NO_FOCUS_NOTE: &str =
    "No specific focus item, use any item from the wardrobe as the anchor.";

pub const SUGGESTION_TEMPERATURE: f32 = 0.8;
pub const VISION_TEMPERATURE: f32 = 0.3;
