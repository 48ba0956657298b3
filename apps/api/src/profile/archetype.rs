use tracing::info;

use crate::errors::AppError;
use crate::llm_client::prompts::{fill_template, ORACLE_PERSONA};
use crate::llm_client::LlmClient;
use crate::models::wardrobe::WardrobeItemRow;
use crate::profile::prompts::{
    ARCHETYPE_PROMPT_TEMPLATE, ARCHETYPE_TEMPERATURE, WARDROBE_SNAPSHOT_HEADER,
};

/// One line per item: `- name (category) | Season: s | Usage: date or n/a`.
/// Empty when the wardrobe is empty.
pub fn wardrobe_snapshot(items: &[WardrobeItemRow]) -> String {
    if items.is_empty() {
        return String::new();
    }
    let lines: Vec<String> = items
        .iter()
        .map(|item| {
            let usage = item
                .last_used
                .map(|t| t.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "n/a".to_string());
            format!(
                "- {} ({}) | Season: {} | Usage: {}",
                item.name, item.category, item.season, usage
            )
        })
        .collect();
    format!("\n{WARDROBE_SNAPSHOT_HEADER}\n{}", lines.join("\n"))
}

pub fn build_archetype_prompt(summary: &str, items: &[WardrobeItemRow]) -> String {
    fill_template(
        ARCHETYPE_PROMPT_TEMPLATE,
        &[
            ("persona", ORACLE_PERSONA),
            ("summary", summary),
            ("wardrobe_note", wardrobe_snapshot(items).as_str()),
        ],
    )
}

/// Asks the model for the user's archetype reading.
pub async fn generate_style_archetype(
    llm: &LlmClient,
    model: &str,
    summary: &str,
    items: &[WardrobeItemRow],
) -> Result<String, AppError> {
    let prompt = build_archetype_prompt(summary, items);
    let archetype = llm
        .complete(model, &prompt, ARCHETYPE_TEMPERATURE)
        .await
        .map_err(|e| AppError::Llm(format!("Archetype generation failed: {e}")))?;
    info!("Generated style archetype ({} chars)", archetype.len());
    Ok(archetype.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn item(name: &str, category: &str, worn: bool) -> WardrobeItemRow {
        WardrobeItemRow {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            name: name.to_string(),
            category: category.to_string(),
            color: None,
            style_tags: vec![],
            image_key: None,
            image_content_type: None,
            season: "fall".to_string(),
            is_favorite: false,
            added_at: Utc::now(),
            last_used: worn.then(|| Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap()),
        }
    }

    #[test]
    fn test_snapshot_lines() {
        let items = vec![item("Camel coat", "Outerwear", true), item("Black loafers", "Shoes", false)];
        assert_eq!(
            wardrobe_snapshot(&items),
            "\n**User's Wardrobe Snapshot**:\n\
             - Camel coat (Outerwear) | Season: fall | Usage: 2026-03-14\n\
             - Black loafers (Shoes) | Season: fall | Usage: n/a"
        );
    }

    #[test]
    fn test_prompt_without_wardrobe_has_no_snapshot() {
        let prompt = build_archetype_prompt("Skin tone: Warm.", &[]);
        assert!(prompt.starts_with("You are The Oracle"));
        assert!(prompt.contains("Style Profile:\nSkin tone: Warm."));
        assert!(!prompt.contains("Wardrobe Snapshot"));
        assert!(!prompt.contains("{wardrobe_note}"));
    }

    #[test]
    fn test_summary_braces_stay_literal() {
        let items = vec![item("Coat {summary}", "Outerwear", false)];
        let prompt = build_archetype_prompt("Aspirational style: {wardrobe_note} drape.", &items);
        assert!(prompt.contains("Aspirational style: {wardrobe_note} drape."));
        assert!(prompt.contains("- Coat {summary} (Outerwear)"));
        assert_eq!(prompt.matches("Wardrobe Snapshot").count(), 1);
    }

    #[test]
    fn test_prompt_with_wardrobe() {
        let items = vec![item("Camel coat", "Outerwear", false)];
        let prompt = build_archetype_prompt("summary", &items);
        assert!(prompt.ends_with("- Camel coat (Outerwear) | Season: fall | Usage: n/a"));
    }
}
