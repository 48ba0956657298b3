//! Prompt assembly and generation for the daily outfit suggestion.

use tracing::{info, warn};

use crate::llm_client::prompts::{fill_template, ORACLE_PERSONA, PROSE_ONLY_INSTRUCTION};
use crate::llm_client::LlmClient;
use crate::models::daily::DailyContext;
use crate::models::wardrobe::PromptItem;
use crate::styling::prompts::{
    FOCUS_NOTE_TEMPLATE, NO_FOCUS_NOTE, SUGGESTION_PROMPT_TEMPLATE, SUGGESTION_TEMPERATURE,
};
use crate::styling::vision::ImageDescription;

pub const FAILED_SUGGESTION_PREFIX: &str = "Styling suggestion could not be generated. Error:";

/// Wardrobe entry standing in for a photo uploaded with the daily request.
pub fn uploaded_item(description: &ImageDescription) -> PromptItem {
    let hint = description.name_hint.trim();
    let name = if hint.is_empty() || hint.eq_ignore_ascii_case("none") {
        let color = description
            .colors
            .first()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .unwrap_or("Black");
        let category = Some(description.category_guess.trim())
            .filter(|c| !c.is_empty())
            .unwrap_or("Item");
        format!("{} {} (uploaded)", capitalize(color), capitalize(category))
    } else {
        hint.to_string()
    };

    let category = match description.category_guess.trim() {
        "" => "unknown".to_string(),
        guess => guess.to_string(),
    };

    PromptItem {
        id: None,
        name,
        category,
        color: description.color_text(),
        style_tags: description.style_tags(),
        season: None,
        is_favorite: None,
        is_uploaded_focus: true,
    }
}

/// First letter upper-case, the rest lower-case.
fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Items the suggestion must use: the uploaded photo (already first in
/// `wardrobe` when present) and the first stored item whose name contains
/// the focus text.
fn focus_items(wardrobe: &[PromptItem], item_focus: &str) -> Vec<PromptItem> {
    let mut focus: Vec<PromptItem> = wardrobe
        .iter()
        .filter(|i| i.is_uploaded_focus)
        .cloned()
        .collect();

    let needle = item_focus.trim().to_lowercase();
    if !needle.is_empty() {
        if let Some(stored) = wardrobe
            .iter()
            .filter(|i| !i.is_uploaded_focus)
            .find(|i| i.name.to_lowercase().contains(&needle))
        {
            focus.push(stored.clone());
        }
    }
    focus
}

fn focus_note(items: &[PromptItem]) -> String {
    if items.is_empty() {
        return NO_FOCUS_NOTE.to_string();
    }
    let listed: Vec<String> = items
        .iter()
        .map(|i| serde_json::to_string_pretty(i).unwrap_or_default())
        .collect();
    fill_template(FOCUS_NOTE_TEMPLATE, &[("focus_items", listed.join("\n").as_str())])
}

/// Builds the suggestion prompt. Returns the prompt and the wardrobe as the
/// model saw it (uploaded photo first).
pub fn build_suggestion_prompt(
    summary: &str,
    context: &DailyContext,
    mut wardrobe: Vec<PromptItem>,
    description: Option<&ImageDescription>,
) -> (String, Vec<PromptItem>) {
    if let Some(description) = description {
        wardrobe.insert(0, uploaded_item(description));
    }
    let focus = focus_items(&wardrobe, &context.item_focus);

    let note = focus_note(&focus);
    let wardrobe_json = serde_json::to_string_pretty(&wardrobe).unwrap_or_default();
    let mut prompt = fill_template(
        SUGGESTION_PROMPT_TEMPLATE,
        &[
            ("persona", ORACLE_PERSONA),
            ("prose_rule", PROSE_ONLY_INSTRUCTION),
            ("focus_note", note.as_str()),
            ("summary", summary),
            ("mood", context.mood_today.as_str()),
            ("occasion", context.occasion.as_str()),
            ("weather", context.weather.as_str()),
            ("wardrobe_json", wardrobe_json.as_str()),
        ],
    );

    if let Some(description) = description {
        prompt.push_str("\nVisual reference: ");
        prompt.push_str(&serde_json::to_string_pretty(description).unwrap_or_default());
    }

    (prompt, wardrobe)
}

/// Runs the prompt. A failed call yields an explanatory suggestion instead
/// of an error so the day's entry is still recorded.
pub async fn generate_suggestion(llm: &LlmClient, model: &str, prompt: &str) -> String {
    match llm.complete(model, prompt, SUGGESTION_TEMPERATURE).await {
        Ok(text) => {
            info!("Generated styling suggestion ({} chars)", text.len());
            text.trim().to_string()
        }
        Err(e) => {
            warn!("Styling suggestion failed: {e}");
            format!("{FAILED_SUGGESTION_PREFIX} {e}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn stored(name: &str, category: &str) -> PromptItem {
        PromptItem {
            id: Some(Uuid::new_v4()),
            name: name.to_string(),
            category: category.to_string(),
            color: None,
            style_tags: vec![],
            season: Some("all".to_string()),
            is_favorite: Some(false),
            is_uploaded_focus: false,
        }
    }

    fn context(focus: &str) -> DailyContext {
        DailyContext {
            mood_today: "Confident but effortless".to_string(),
            occasion: "Work day".to_string(),
            weather: "Cold and dry".to_string(),
            item_focus: focus.to_string(),
        }
    }

    fn description(hint: &str) -> ImageDescription {
        ImageDescription {
            name_hint: hint.to_string(),
            category_guess: "trench coat".to_string(),
            colors: vec!["chocolate".to_string(), "brown".to_string()],
            patterns: vec!["plain".to_string()],
            silhouette: "belted".to_string(),
        }
    }

    #[test]
    fn test_uploaded_item_fallback_name() {
        let item = uploaded_item(&description("None"));
        assert_eq!(item.name, "Chocolate Trench coat (uploaded)");
        assert_eq!(item.color.as_deref(), Some("chocolate, brown"));
        assert_eq!(item.style_tags, vec!["plain", "belted"]);
        assert!(item.is_uploaded_focus);

        let bare = uploaded_item(&ImageDescription::default());
        assert_eq!(bare.name, "Black Item (uploaded)");
        assert_eq!(bare.category, "unknown");
    }

    #[test]
    fn test_uploaded_item_keeps_hint() {
        assert_eq!(uploaded_item(&description("My Lemaire trench")).name, "My Lemaire trench");
    }

    #[test]
    fn test_prompt_without_focus() {
        let (prompt, wardrobe) = build_suggestion_prompt(
            "Skin tone: Warm.",
            &context(""),
            vec![stored("Camel coat", "Outerwear")],
            None,
        );
        assert_eq!(wardrobe.len(), 1);
        assert!(prompt.starts_with("You are The Oracle"));
        assert!(prompt.contains(NO_FOCUS_NOTE));
        assert!(prompt.contains("Mood: Confident but effortless\nOccasion: Work day\nWeather: Cold and dry"));
        assert!(prompt.contains("\"name\": \"Camel coat\""));
        assert!(!prompt.contains("Visual reference"));
        assert!(!prompt.contains("{summary}"));
    }

    #[test]
    fn test_uploaded_photo_is_first_and_in_focus() {
        let d = description("Chocolate trench");
        let (prompt, wardrobe) = build_suggestion_prompt(
            "summary",
            &context(""),
            vec![stored("Camel coat", "Outerwear")],
            Some(&d),
        );
        assert!(wardrobe[0].is_uploaded_focus);
        assert_eq!(wardrobe[0].name, "Chocolate trench");
        assert!(prompt.contains("MUST be styled into today's outfit"));
        assert!(prompt.contains("\"is_uploaded_focus\": true"));
        assert!(prompt.contains("\nVisual reference: {"));
    }

    #[test]
    fn test_stored_focus_is_matched_by_substring() {
        let wardrobe = vec![stored("Black loafers", "Shoes"), stored("White silk shirt", "Top")];
        let focus = focus_items(&wardrobe, "silk");
        assert_eq!(focus.len(), 1);
        assert_eq!(focus[0].name, "White silk shirt");
        assert!(focus_items(&wardrobe, "  ").is_empty());
        assert!(focus_items(&wardrobe, "trench").is_empty());
    }

    #[test]
    fn test_focus_note_lists_items_as_json() {
        let note = focus_note(&[stored("Black loafers", "Shoes")]);
        assert!(note.contains("\"category\": \"Shoes\""));
        assert!(note.ends_with("without changing their category or style."));
    }

    #[test]
    fn test_braces_in_user_text_are_not_expanded() {
        let summary = "Texture and silhouettes: {mood} knits.";
        let (prompt, _) = build_suggestion_prompt(
            summary,
            &context("{weather}"),
            vec![stored("My {weather} jacket", "Outerwear")],
            None,
        );
        assert!(prompt.contains("Style Profile:\nTexture and silhouettes: {mood} knits."));
        assert!(prompt.contains("\"name\": \"My {weather} jacket\""));
        assert!(prompt.contains("Mood: Confident but effortless\nOccasion: Work day\nWeather: Cold and dry"));
        assert!(!prompt.contains("My Cold and dry jacket"));
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("nAVY blue"), "Navy blue");
        assert_eq!(capitalize(""), "");
    }
}
