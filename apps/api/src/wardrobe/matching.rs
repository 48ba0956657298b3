//! Finds the wardrobe items a suggestion talks about.

use std::collections::HashSet;

use uuid::Uuid;

use crate::models::wardrobe::WardrobeItemRow;

/// Words shorter than this are too common ("top", "tee") to count as a mention.
const MIN_WORD_LEN: usize = 4;

/// Returns the focus item first (when given and owned), followed by every
/// other item that has a significant word appearing in the suggestion text.
pub fn match_items<'a>(
    suggestion: &str,
    items: &'a [WardrobeItemRow],
    focus_id: Option<Uuid>,
) -> Vec<&'a WardrobeItemRow> {
    let text = suggestion.to_lowercase();
    let mut seen = HashSet::new();
    let mut matched = Vec::new();

    if let Some(focus) = focus_id.and_then(|id| items.iter().find(|i| i.id == id)) {
        seen.insert(focus.id);
        matched.push(focus);
    }

    for item in items {
        if seen.contains(&item.id) {
            continue;
        }
        if is_mentioned(&text, &item.name) {
            seen.insert(item.id);
            matched.push(item);
        }
    }

    matched
}

/// Names of items whose full name appears in the suggestion.
pub fn mentioned_names<'a, I>(suggestion: &str, names: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let text = suggestion.to_lowercase();
    names
        .into_iter()
        .filter(|name| !name.trim().is_empty() && text.contains(&name.to_lowercase()))
        .map(str::to_string)
        .collect()
}

fn is_mentioned(lowered_text: &str, name: &str) -> bool {
    name.to_lowercase()
        .split_whitespace()
        .filter(|w| w.chars().count() >= MIN_WORD_LEN)
        .any(|w| lowered_text.contains(w))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn item(name: &str) -> WardrobeItemRow {
        WardrobeItemRow {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            name: name.to_string(),
            category: "Top".to_string(),
            color: None,
            style_tags: vec![],
            image_key: None,
            image_content_type: None,
            season: "all".to_string(),
            is_favorite: false,
            added_at: Utc::now(),
            last_used: None,
        }
    }

    #[test]
    fn test_matches_on_significant_words() {
        let items = vec![item("Chocolate Lemaire trench"), item("Red tee"), item("Black loafers")];
        let matched = match_items("Pair the trench with your loafers.", &items, None);
        let names: Vec<_> = matched.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Chocolate Lemaire trench", "Black loafers"]);
    }

    #[test]
    fn test_short_words_do_not_match() {
        let items = vec![item("Red tee")];
        assert!(match_items("A red scarf and a tee.", &items, None).is_empty());
    }

    #[test]
    fn test_focus_item_comes_first_without_duplicates() {
        let items = vec![item("Wool coat"), item("Silk scarf")];
        let focus = items[1].id;
        let matched = match_items("Silk scarf over a wool coat.", &items, Some(focus));
        assert_eq!(matched.len(), 2);
        assert_eq!(matched[0].id, focus);
        assert_eq!(matched[1].name, "Wool coat");
    }

    #[test]
    fn test_unknown_focus_is_ignored() {
        let items = vec![item("Wool coat")];
        let matched = match_items("nothing relevant", &items, Some(Uuid::new_v4()));
        assert!(matched.is_empty());
    }

    #[test]
    fn test_mentioned_names_need_full_name() {
        let names = ["White silk shirt", "Silk", "Jeans"];
        let found = mentioned_names("Try the white silk shirt tucked in.", names);
        assert_eq!(found, vec!["White silk shirt".to_string(), "Silk".to_string()]);
    }
}
