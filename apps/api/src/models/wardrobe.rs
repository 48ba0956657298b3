use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Categories offered by the wardrobe upload form.
pub const CATEGORIES: &[&str] = &["Top", "Bottom", "Outerwear", "Shoes", "Bag", "Accessory"];

/// Category given to items saved from a daily styling session.
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
    #[default]
    All,
}

impl Season {
    pub const ALL: [Season; 5] = [
        Season::Spring,
        Season::Summer,
        Season::Fall,
        Season::Winter,
        Season::All,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Fall => "fall",
            Season::Winter => "winter",
            Season::All => "all",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
            Season::Winter => "Winter",
            Season::All => "All Seasons",
        }
    }

    pub fn parse(value: &str) -> Option<Season> {
        let value = value.trim();
        Season::ALL
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(value))
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct WardrobeItemRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub category: String,
    pub color: Option<String>,
    pub style_tags: Vec<String>,
    pub image_key: Option<String>,
    pub image_content_type: Option<String>,
    pub season: String,
    pub is_favorite: bool,
    pub added_at: DateTime<Utc>,
    pub last_used: Option<DateTime<Utc>>,
}

/// API representation of a wardrobe item. Image bytes are served separately.
#[derive(Debug, Clone, Serialize)]
pub struct WardrobeItemView {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub color: Option<String>,
    pub style_tags: Vec<String>,
    pub season: String,
    pub is_favorite: bool,
    pub added_at: DateTime<Utc>,
    pub last_used: Option<DateTime<Utc>>,
    pub image_url: Option<String>,
}

impl From<&WardrobeItemRow> for WardrobeItemView {
    fn from(row: &WardrobeItemRow) -> Self {
        Self {
            id: row.id,
            name: row.name.clone(),
            category: row.category.clone(),
            color: row.color.clone(),
            style_tags: row.style_tags.clone(),
            season: row.season.clone(),
            is_favorite: row.is_favorite,
            added_at: row.added_at,
            last_used: row.last_used,
            image_url: row
                .image_key
                .as_ref()
                .map(|_| format!("/api/v1/wardrobe/{}/image", row.id)),
        }
    }
}

/// Wardrobe entry as shown to the model. Timestamps and image data are left out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub name: String,
    pub category: String,
    pub color: Option<String>,
    pub style_tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_favorite: Option<bool>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_uploaded_focus: bool,
}

impl From<&WardrobeItemRow> for PromptItem {
    fn from(row: &WardrobeItemRow) -> Self {
        Self {
            id: Some(row.id),
            name: row.name.clone(),
            category: row.category.clone(),
            color: row.color.clone(),
            style_tags: row.style_tags.clone(),
            season: Some(row.season.clone()),
            is_favorite: Some(row.is_favorite),
            is_uploaded_focus: false,
        }
    }
}

/// Canonical spelling of a form category, if it is one of the known ones.
pub fn normalize_category(value: &str) -> Option<&'static str> {
    let value = value.trim();
    CATEGORIES
        .iter()
        .chain(std::iter::once(&DEFAULT_CATEGORY))
        .find(|c| c.eq_ignore_ascii_case(value))
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_season_parse_is_case_insensitive() {
        assert_eq!(Season::parse("Winter"), Some(Season::Winter));
        assert_eq!(Season::parse(" all "), Some(Season::All));
        assert_eq!(Season::parse("monsoon"), None);
    }

    #[test]
    fn test_normalize_category() {
        assert_eq!(normalize_category("outerwear"), Some("Outerwear"));
        assert_eq!(normalize_category("uncategorized"), Some(DEFAULT_CATEGORY));
        assert_eq!(normalize_category("Hat"), None);
    }

    #[test]
    fn test_prompt_item_hides_upload_flag_for_stored_items() {
        let item = PromptItem {
            id: None,
            name: "Camel coat".to_string(),
            category: "Outerwear".to_string(),
            color: Some("camel".to_string()),
            style_tags: vec![],
            season: Some("fall".to_string()),
            is_favorite: Some(true),
            is_uploaded_focus: false,
        };
        let value = serde_json::to_value(&item).unwrap();
        assert!(value.get("is_uploaded_focus").is_none());
        assert!(value.get("id").is_none());
        assert_eq!(value["is_favorite"], true);
    }
}
