use axum::{
    extract::{Multipart, State},
    response::{IntoResponse, Redirect, Response},
};

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::forms::MultipartForm;
use crate::models::daily::DailyInputRow;
use crate::models::suggestion::SuggestionRow;
use crate::models::wardrobe::{Season, WardrobeItemRow, CATEGORIES};
use crate::profile::store::find_profile;
use crate::state::AppState;
use crate::styling::store::{list_suggestions, recent_daily_inputs};
use crate::views::filters::{escape_html, linebreaks, strip_markdown};
use crate::views::layout::{error_notice, page, PageResult};
use crate::wardrobe::service::{add_item, UploadRequest};
use crate::wardrobe::store::list_items;

const HISTORY_LIMIT: usize = 5;

fn item_card(item: &WardrobeItemRow) -> String {
    let image = match &item.image_key {
        Some(_) => format!(
            r#"<img src="/api/v1/wardrobe/{}/image" alt="{}" loading="lazy">"#,
            item.id,
            escape_html(&item.name)
        ),
        None => r#"<img alt="">"#.to_string(),
    };
    let season = Season::parse(&item.season)
        .map(|s| s.label())
        .unwrap_or("All Seasons");
    let last_used = item
        .last_used
        .map(|t| t.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "never".to_string());
    let color = item
        .color
        .as_deref()
        .map(|c| format!(" · {}", escape_html(c)))
        .unwrap_or_default();

    format!(
        r#"<div class="item{fav_class}">
    {image}
    <div><strong>{name}</strong></div>
    <div class="meta">{category}{color} · {season}</div>
    <div class="meta">Last worn: {last_used}</div>
    <button class="secondary" data-action="favorite" data-id="{id}">{fav_label}</button>
    <button class="secondary" data-action="worn" data-id="{id}">Wore it</button>
    <button class="secondary" data-action="delete" data-id="{id}">Delete</button>
</div>"#,
        fav_class = if item.is_favorite { " favorite" } else { "" },
        fav_label = if item.is_favorite { "Unfavorite" } else { "Favorite" },
        name = escape_html(&item.name),
        category = escape_html(&item.category),
        id = item.id,
    )
}

fn upload_form(error: Option<&str>) -> String {
    let categories: String = CATEGORIES
        .iter()
        .map(|c| format!(r#"<option value="{c}">{c}</option>"#))
        .collect();
    let seasons: String = Season::ALL
        .iter()
        .map(|s| {
            let selected = if *s == Season::All { " selected" } else { "" };
            format!(
                r#"<option value="{}"{selected}>{}</option>"#,
                s.as_str(),
                s.label()
            )
        })
        .collect();

    format!(
        r#"<div class="card">
    <h2>Add to your wardrobe</h2>
    {error}
    <form method="post" action="/dashboard" enctype="multipart/form-data">
        <label for="name">Item name</label>
        <input type="text" id="name" name="name" placeholder="e.g., White silk shirt" required>
        <label for="category">Category</label>
        <select id="category" name="category">{categories}</select>
        <label for="season">Season</label>
        <select id="season" name="season">{seasons}</select>
        <label for="color">Color (leave blank to detect from the photo)</label>
        <input type="text" id="color" name="color">
        <label for="style_tags">Style tags, comma separated</label>
        <input type="text" id="style_tags" name="style_tags">
        <label for="image">Image</label>
        <input type="file" id="image" name="image" accept="image/*">
        <button type="submit">Upload</button>
    </form>
</div>"#,
        error = error.map(error_notice).unwrap_or_default(),
    )
}

fn daily_table(inputs: &[DailyInputRow]) -> String {
    if inputs.is_empty() {
        return r#"<p class="muted">No daily check-ins yet. <a href="/daily-input">Start today's</a>.</p>"#
            .to_string();
    }
    let rows: String = inputs
        .iter()
        .map(|d| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                d.input_date.format("%Y-%m-%d"),
                escape_html(&d.mood_today),
                escape_html(&d.occasion),
                escape_html(&d.weather)
            )
        })
        .collect();
    format!(
        "<table><tr><th>Date</th><th>Mood</th><th>Occasion</th><th>Weather</th></tr>{rows}</table>"
    )
}

fn history_list(suggestions: &[SuggestionRow]) -> String {
    if suggestions.is_empty() {
        return String::new();
    }
    let items: String = suggestions
        .iter()
        .take(HISTORY_LIMIT)
        .map(|s| {
            format!(
                r#"<li><a href="/outfit/{}">{}</a> <span class="muted">{}</span></li>"#,
                s.id,
                s.created_at.format("%Y-%m-%d %H:%M"),
                escape_html(s.occasion.as_deref().unwrap_or(""))
            )
        })
        .collect();
    format!(r#"<div class="card"><h2>Past outfits</h2><ul>{items}</ul></div>"#)
}

async fn render(state: &AppState, user: &AuthUser, upload_error: Option<&str>) -> PageResult {
    let profile = find_profile(&state.db, user.id).await?;
    let daily_inputs = recent_daily_inputs(&state.db, user.id).await?;
    let suggestions = list_suggestions(&state.db, user.id).await?;
    let wardrobe = list_items(&state.db, user.id).await?;

    let profile_card = match profile.as_ref().and_then(|p| p.style_archetype.as_deref()) {
        Some(archetype) => format!(
            r#"<div class="card"><h2>Your archetype</h2><div class="prose">{}</div><a href="/profile">Retake the questionnaire</a></div>"#,
            linebreaks(&strip_markdown(archetype))
        ),
        None => r#"<div class="card"><h2>Your archetype</h2><p>You have not completed your style profile yet.</p><a class="button" href="/profile">Create your profile</a></div>"#.to_string(),
    };

    let today = daily_inputs
        .first()
        .and_then(|d| d.outfit_suggestion.as_deref())
        .map(|s| linebreaks(&strip_markdown(s)))
        .unwrap_or_else(|| {
            r#"<p class="muted">Nothing yet today.</p><a class="button" href="/daily-input">Ask the Oracle</a>"#
                .to_string()
        });

    let grid = if wardrobe.is_empty() {
        r#"<p class="muted">Your wardrobe is empty.</p>"#.to_string()
    } else {
        let cards: String = wardrobe.iter().map(item_card).collect();
        format!(r#"<div class="grid">{cards}</div>"#)
    };

    let body = format!(
        r#"{profile_card}
<div class="card"><h2>Today's suggestion</h2><div class="prose">{today}</div></div>
<div class="card"><h2>Recent check-ins</h2>{daily}</div>
{history}
<div class="card"><h2>Wardrobe</h2>{grid}</div>
{upload}"#,
        daily = daily_table(&daily_inputs),
        history = history_list(&suggestions),
        upload = upload_form(upload_error),
    );
    Ok(page("Dashboard", Some(&user.email), &body).into_response())
}

/// GET /dashboard
pub async fn dashboard_page(
    State(state): State<AppState>,
    user: Option<AuthUser>,
) -> PageResult {
    let Some(user) = user else {
        return Ok(Redirect::to("/login").into_response());
    };
    render(&state, &user, None).await
}

/// POST /dashboard (multipart wardrobe upload)
pub async fn dashboard_upload(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    multipart: Multipart,
) -> PageResult {
    let Some(user) = user else {
        return Ok(Redirect::to("/login").into_response());
    };
    let form = MultipartForm::read(multipart).await?;
    let result = match UploadRequest::from_form(&form) {
        Ok(req) => add_item(&state, user.id, req).await.map(|_| ()),
        Err(e) => Err(e),
    };
    match result {
        Ok(()) => Ok(Redirect::to("/dashboard").into_response()),
        Err(e @ (AppError::Validation(_) | AppError::Image(_))) => {
            render(&state, &user, Some(&e.public_message())).await
        }
        Err(e) => Err(e.into()),
    }
}
