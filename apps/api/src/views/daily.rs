use axum::{
    extract::{Multipart, State},
    response::{IntoResponse, Redirect},
};

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::forms::MultipartForm;
use crate::models::wardrobe::{WardrobeItemRow, WardrobeItemView};
use crate::state::AppState;
use crate::styling::form::{DailyRequest, OCCASIONS, WEATHER};
use crate::styling::service::{run_daily, DailyOutcome};
use crate::views::filters::{escape_html, linebreaks};
use crate::views::layout::{error_notice, page, radio_group, PageResult};
use crate::wardrobe::store::list_items;

fn daily_form(wardrobe: &[WardrobeItemRow], error: Option<&str>) -> String {
    let occasions: Vec<(&str, &str)> = OCCASIONS.iter().map(|o| (*o, *o)).collect();
    let options: String = wardrobe
        .iter()
        .map(|item| {
            format!(
                r#"<option value="{}">{}</option>"#,
                item.id,
                escape_html(&item.name)
            )
        })
        .collect();

    format!(
        r#"<h1>Daily styling</h1>
{error}
<form method="post" action="/daily-input" enctype="multipart/form-data" class="card">
    <label for="mood_today">How do you want to feel today?</label>
    <input type="text" id="mood_today" name="mood_today" placeholder="e.g., Confident but effortless, soft and protected..." required>
    <label>What's the occasion?</label>
    {occasion}
    <label>What's the weather like?</label>
    {weather}
    <label>Are you styling a new item today?</label>
    {add_new_item}
    <label for="item_focus">Is there a specific item you're trying to style?</label>
    <input type="text" id="item_focus" name="item_focus" placeholder="e.g., My chocolate Lemaire trench...">
    <label for="image_name_hint">What should we call the item in the photo?</label>
    <input type="text" id="image_name_hint" name="image_name_hint">
    <label for="image">Upload a photo of what you're styling</label>
    <input type="file" id="image" name="image" accept="image/*">
    <label for="wardrobe_item">Or select from your wardrobe</label>
    <select id="wardrobe_item" name="wardrobe_item"><option value="">-</option>{options}</select>
    <button type="submit">Ask the Oracle</button>
</form>"#,
        error = error.map(error_notice).unwrap_or_default(),
        occasion = radio_group("occasion", &occasions, ""),
        weather = radio_group("weather", WEATHER, ""),
        add_new_item = radio_group("add_new_item", &[("no", "No"), ("yes", "Yes")], "no"),
    )
}

fn matched_card(item: &WardrobeItemView) -> String {
    let image = item
        .image_url
        .as_deref()
        .map(|url| format!(r#"<img src="{url}" alt="">"#))
        .unwrap_or_default();
    format!(
        r#"<div class="item">{image}<div><strong>{}</strong></div><div class="meta">{}</div></div>"#,
        escape_html(&item.name),
        escape_html(&item.category)
    )
}

/// Matched wardrobe items as a grid, or nothing.
pub fn matched_grid(items: &[WardrobeItemView]) -> String {
    if items.is_empty() {
        return String::new();
    }
    let cards: String = items.iter().map(matched_card).collect();
    format!(r#"<div class="card"><h2>From your wardrobe</h2><div class="grid">{cards}</div></div>"#)
}

fn result_page(outcome: &DailyOutcome) -> String {
    let ctx = &outcome.daily_input;
    let proposed = outcome
        .proposed_item
        .as_ref()
        .map(|item| {
            format!(
                r#"<div class="card">
    <h2>New item</h2>
    <img id="proposed-image" src="{src}" data-src="{src}" alt="" style="max-width:240px">
    <div><strong>{name}</strong></div>
    <button data-action="add-proposed" data-name="{name}">Add to wardrobe</button>
</div>"#,
                src = escape_html(&item.image_b64),
                name = escape_html(&item.name),
            )
        })
        .unwrap_or_default();

    format!(
        r#"<div class="card">
    <h1>Today's look</h1>
    <p class="muted">{mood} · {occasion} · {weather}</p>
    <div class="prose">{text}</div>
    <a href="/outfit/{id}">Rate this outfit</a>
</div>
{matched}
{proposed}"#,
        mood = escape_html(&ctx.mood_today),
        occasion = escape_html(&ctx.occasion),
        weather = escape_html(&ctx.weather),
        text = linebreaks(&outcome.plain_text),
        id = outcome.suggestion.id,
        matched = matched_grid(&outcome.matched_items),
    )
}

/// GET /daily-input
pub async fn daily_page(State(state): State<AppState>, user: Option<AuthUser>) -> PageResult {
    let Some(user) = user else {
        return Ok(Redirect::to("/login").into_response());
    };
    let wardrobe = list_items(&state.db, user.id).await?;
    Ok(page("Daily styling", Some(&user.email), &daily_form(&wardrobe, None)).into_response())
}

/// POST /daily-input (multipart)
pub async fn daily_submit(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    multipart: Multipart,
) -> PageResult {
    let Some(user) = user else {
        return Ok(Redirect::to("/login").into_response());
    };
    let form = MultipartForm::read(multipart).await?;
    let result = match DailyRequest::from_form(&form) {
        Ok(req) => run_daily(&state, user.id, req).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(outcome) => {
            Ok(page("Today's look", Some(&user.email), &result_page(&outcome)).into_response())
        }
        Err(AppError::UnprocessableEntity(_)) => {
            Ok(Redirect::to("/profile?missing=1").into_response())
        }
        Err(e @ (AppError::Validation(_) | AppError::Image(_) | AppError::NotFound(_))) => {
            let wardrobe = list_items(&state.db, user.id).await?;
            let message = format!(
                "Something went wrong generating your outfit: {}",
                e.public_message()
            );
            Ok(page(
                "Daily styling",
                Some(&user.email),
                &daily_form(&wardrobe, Some(&message)),
            )
            .into_response())
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_lists_wardrobe_and_choices() {
        let item = WardrobeItemRow {
            id: uuid::Uuid::nil(),
            user_id: uuid::Uuid::nil(),
            name: "Camel <coat>".to_string(),
            category: "Outerwear".to_string(),
            color: None,
            style_tags: vec![],
            image_key: None,
            image_content_type: None,
            season: "all".to_string(),
            is_favorite: false,
            added_at: chrono::Utc::now(),
            last_used: None,
        };
        let html = daily_form(&[item], Some("Mood: this field is required."));
        assert!(html.contains("Camel &lt;coat&gt;"));
        assert!(html.contains(r#"value="Relaxing / staying in""#));
        assert!(html.contains(r#"value="no" checked"#));
        assert!(html.contains("Mood: this field is required."));
    }

    #[test]
    fn test_matched_grid_empty() {
        assert_eq!(matched_grid(&[]), "");
    }
}
