//! The daily styling run and suggestion history.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::daily::DailyInputRow;
use crate::models::suggestion::{FeedbackRow, Rating, SuggestionRow};
use crate::models::wardrobe::{PromptItem, WardrobeItemView};
use crate::profile::store::find_profile;
use crate::profile::summary::{combine_daily_context, combine_style_summary};
use crate::state::AppState;
use crate::styling::form::DailyRequest;
use crate::styling::store;
use crate::styling::suggestion::{build_suggestion_prompt, generate_suggestion};
use crate::styling::vision::{describe_image, ImageDescription};
use crate::views::filters::strip_markdown;
use crate::wardrobe::matching::{match_items, mentioned_names};
use crate::wardrobe::service::compress;
use crate::wardrobe::store::{list_items, update_last_used};

pub const MISSING_PROFILE: &str =
    "Please create your style profile first before requesting daily guidance.";
const DEFAULT_UPLOAD_NAME: &str = "Uploaded Item";

/// A newly photographed item the user may add to the wardrobe.
#[derive(Debug, Clone, Serialize)]
pub struct ProposedItem {
    pub name: String,
    /// `data:` URL, accepted as `image_b64` by the add-from-daily endpoint.
    pub image_b64: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DailyOutcome {
    pub daily_input: DailyInputRow,
    pub suggestion: SuggestionRow,
    pub plain_text: String,
    pub matched_items: Vec<WardrobeItemView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proposed_item: Option<ProposedItem>,
}

/// Runs one daily styling request end to end: photo description, prompt,
/// generation, usage tracking and persistence.
pub async fn run_daily(
    state: &AppState,
    user_id: Uuid,
    mut req: DailyRequest,
) -> Result<DailyOutcome, AppError> {
    let profile = find_profile(&state.db, user_id)
        .await?
        .ok_or_else(|| AppError::UnprocessableEntity(MISSING_PROFILE.to_string()))?;

    let wardrobe = list_items(&state.db, user_id).await?;

    if let Some(selected) = req.wardrobe_item {
        let item = wardrobe
            .iter()
            .find(|i| i.id == selected)
            .ok_or_else(|| AppError::NotFound(format!("Wardrobe item {selected} not found")))?;
        req.context.item_focus = item.name.clone();
    }

    let photo = match req.image.take() {
        Some(raw) => Some(compress(state, raw).await?),
        None => None,
    };

    let description = match &photo {
        Some(photo) => {
            let hint = req
                .name_hint
                .as_deref()
                .filter(|h| !h.eq_ignore_ascii_case("none"))
                .or(Some(req.context.item_focus.as_str()).filter(|f| !f.is_empty()))
                .unwrap_or(DEFAULT_UPLOAD_NAME)
                .to_string();
            let mut description = match describe_image(
                &state.llm,
                &state.config.models.vision,
                &photo.data_url(),
                Some(hint.as_str()),
            )
            .await
            {
                Ok(d) => d,
                Err(e) => {
                    warn!("Could not describe daily photo for user {user_id}: {e}");
                    ImageDescription::default()
                }
            };
            description.name_hint = hint;
            Some(description)
        }
        None => None,
    };

    let summary = combine_style_summary(&profile.profile());
    let stored: Vec<PromptItem> = wardrobe.iter().map(PromptItem::from).collect();
    let (prompt, prompt_wardrobe) =
        build_suggestion_prompt(&summary, &req.context, stored, description.as_ref());

    let text = generate_suggestion(&state.llm, &state.config.models.suggestion, &prompt).await;

    let used = mentioned_names(&text, prompt_wardrobe.iter().map(|i| i.name.as_str()));
    if !used.is_empty() {
        let touched = update_last_used(&state.db, user_id, &used).await?;
        info!("Marked {touched} wardrobe items as used");
    }

    let today = Utc::now().date_naive();
    let daily_input = store::save_daily_input(
        &state.db,
        profile.id,
        today,
        &req.context,
        &text,
        description.as_ref(),
    )
    .await?;

    let details = json!({
        "summary": combine_daily_context(&req.context),
        "item_focus": req.context.item_focus,
        "wardrobe_item": req.wardrobe_item,
        "image_description": description,
    });
    let suggestion =
        store::insert_suggestion(&state.db, user_id, &text, &req.context, &details).await?;

    let matched_items = match_items(&text, &wardrobe, req.wardrobe_item)
        .into_iter()
        .map(WardrobeItemView::from)
        .collect();

    let proposed_item = match (&photo, req.add_new_item) {
        (Some(photo), true) => Some(ProposedItem {
            name: req.context.item_focus.clone(),
            image_b64: photo.data_url(),
        }),
        _ => None,
    };

    Ok(DailyOutcome {
        daily_input,
        plain_text: strip_markdown(&text),
        suggestion,
        matched_items,
        proposed_item,
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct FeedbackView {
    pub rating: Rating,
    pub rating_display: &'static str,
    pub comment: String,
}

impl FeedbackView {
    fn from_row(row: &FeedbackRow) -> Option<Self> {
        let rating = Rating::parse(&row.rating)?;
        Some(Self {
            rating,
            rating_display: rating.label(),
            comment: row.comment.clone(),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SuggestionDetail {
    pub suggestion: SuggestionRow,
    pub plain_text: String,
    pub feedback: Option<FeedbackView>,
    pub matched_items: Vec<WardrobeItemView>,
}

pub async fn suggestion_detail(
    state: &AppState,
    user_id: Uuid,
    suggestion_id: Uuid,
) -> Result<SuggestionDetail, AppError> {
    let suggestion = store::get_suggestion(&state.db, user_id, suggestion_id).await?;
    let feedback = store::find_feedback(&state.db, user_id, suggestion_id)
        .await?
        .as_ref()
        .and_then(FeedbackView::from_row);
    let wardrobe = list_items(&state.db, user_id).await?;
    let matched_items = match_items(&suggestion.content, &wardrobe, None)
        .into_iter()
        .map(WardrobeItemView::from)
        .collect();

    Ok(SuggestionDetail {
        plain_text: strip_markdown(&suggestion.content),
        suggestion,
        feedback,
        matched_items,
    })
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FeedbackRequest {
    pub rating: String,
    pub comment: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeedbackResponse {
    pub status: &'static str,
    pub rating: Rating,
    pub rating_display: &'static str,
}

pub fn parse_rating(raw: &str) -> Result<Rating, AppError> {
    Rating::parse(raw).ok_or_else(|| {
        AppError::Validation("Rating must be one of: loved, meh, dislike.".to_string())
    })
}

/// Stores or replaces the user's rating for one of their suggestions.
pub async fn submit_feedback(
    state: &AppState,
    user_id: Uuid,
    suggestion_id: Uuid,
    req: &FeedbackRequest,
) -> Result<FeedbackResponse, AppError> {
    let rating = parse_rating(&req.rating)?;
    store::get_suggestion(&state.db, user_id, suggestion_id).await?;
    store::upsert_feedback(&state.db, user_id, suggestion_id, rating, req.comment.trim()).await?;
    Ok(FeedbackResponse {
        status: "success",
        rating,
        rating_display: rating.label(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rating() {
        assert_eq!(parse_rating("loved").unwrap(), Rating::Loved);
        assert!(matches!(parse_rating("5 stars"), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_feedback_view_from_row() {
        let row = FeedbackRow {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            suggestion_id: Uuid::nil(),
            rating: "meh".to_string(),
            comment: "Too warm".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let view = FeedbackView::from_row(&row).unwrap();
        assert_eq!(view.rating_display, "Neutral");

        let broken = FeedbackRow {
            rating: "???".to_string(),
            ..row
        };
        assert!(FeedbackView::from_row(&broken).is_none());
    }

    #[test]
    fn test_proposed_item_serializes_data_url() {
        let item = ProposedItem {
            name: "Chocolate trench".to_string(),
            image_b64: "data:image/jpeg;base64,AQID".to_string(),
        };
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["image_b64"], "data:image/jpeg;base64,AQID");
    }
}
