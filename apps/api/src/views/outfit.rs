use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::{IntoResponse, Redirect},
    Form, Json,
};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::models::suggestion::Rating;
use crate::state::AppState;
use crate::styling::service::{submit_feedback, suggestion_detail, FeedbackRequest, SuggestionDetail};
use crate::views::daily::matched_grid;
use crate::views::filters::{escape_html, linebreaks};
use crate::views::layout::{page, radio_group, PageResult};

const RATINGS: [Rating; 3] = [Rating::Loved, Rating::Meh, Rating::Dislike];

fn detail_body(detail: &SuggestionDetail) -> String {
    let s = &detail.suggestion;
    let context: String = [
        ("Mood", s.mood.as_deref()),
        ("Occasion", s.occasion.as_deref()),
        ("Weather", s.weather.as_deref()),
    ]
    .into_iter()
    .filter_map(|(label, value)| value.filter(|v| !v.is_empty()).map(|v| (label, v)))
    .map(|(label, v)| format!("<tr><th>{label}</th><td>{}</td></tr>", escape_html(v)))
    .collect();

    let choices: Vec<(&str, &str)> = RATINGS.iter().map(|r| (r.as_str(), r.label())).collect();
    let (selected, comment, current) = match &detail.feedback {
        Some(f) => (
            f.rating.as_str(),
            f.comment.as_str(),
            format!(
                r#"<p class="muted">Your rating: {}</p>"#,
                f.rating_display
            ),
        ),
        None => ("", "", String::new()),
    };

    format!(
        r#"<div class="card">
    <h1>Outfit from {date}</h1>
    <table>{context}</table>
    <div class="prose">{text}</div>
</div>
{matched}
<div class="card">
    <h2>How did it feel?</h2>
    {current}
    <form method="post" action="/feedback/{id}">
        {ratings}
        <label for="comment">Anything to add?</label>
        <textarea id="comment" name="comment">{comment}</textarea>
        <button type="submit">Send feedback</button>
    </form>
</div>"#,
        date = s.created_at.format("%Y-%m-%d"),
        text = linebreaks(&detail.plain_text),
        matched = matched_grid(&detail.matched_items),
        id = s.id,
        ratings = radio_group("rating", &choices, selected),
        comment = escape_html(comment),
    )
}

/// GET /outfit/:id
pub async fn outfit_page(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    Path(suggestion_id): Path<Uuid>,
) -> PageResult {
    let Some(user) = user else {
        return Ok(Redirect::to("/login").into_response());
    };
    let detail = suggestion_detail(&state, user.id, suggestion_id).await?;
    Ok(page("Outfit", Some(&user.email), &detail_body(&detail)).into_response())
}

/// POST /feedback/:id
/// Answers XMLHttpRequest callers with JSON, browsers with a redirect.
pub async fn feedback_submit(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    Path(suggestion_id): Path<Uuid>,
    headers: HeaderMap,
    Form(req): Form<FeedbackRequest>,
) -> PageResult {
    let Some(user) = user else {
        return Ok(Redirect::to("/login").into_response());
    };
    let response = submit_feedback(&state, user.id, suggestion_id, &req).await?;
    let is_xhr = headers
        .get("x-requested-with")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.eq_ignore_ascii_case("XMLHttpRequest"));
    if is_xhr {
        return Ok(Json(response).into_response());
    }
    Ok(Redirect::to("/dashboard").into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::suggestion::SuggestionRow;
    use crate::styling::service::FeedbackView;
    use chrono::Utc;

    fn detail(feedback: Option<FeedbackView>) -> SuggestionDetail {
        SuggestionDetail {
            suggestion: SuggestionRow {
                id: Uuid::nil(),
                user_id: Uuid::nil(),
                content: "Wear the coat.".to_string(),
                mood: Some("Calm".to_string()),
                occasion: Some("Travel".to_string()),
                weather: None,
                context: None,
                created_at: Utc::now(),
            },
            plain_text: "Wear the coat.".to_string(),
            feedback,
            matched_items: vec![],
        }
    }

    #[test]
    fn test_detail_without_feedback() {
        let html = detail_body(&detail(None));
        assert!(html.contains("<th>Mood</th><td>Calm</td>"));
        assert!(!html.contains("<th>Weather</th>"));
        assert!(html.contains(r#"value="loved"> Loved it"#));
        assert!(!html.contains("Your rating"));
    }

    #[test]
    fn test_detail_with_feedback() {
        let html = detail_body(&detail(Some(FeedbackView {
            rating: Rating::Dislike,
            rating_display: "Not for me",
            comment: "Too formal".to_string(),
        })));
        assert!(html.contains("Your rating: Not for me"));
        assert!(html.contains(r#"value="dislike" checked"#));
        assert!(html.contains(">Too formal</textarea>"));
    }
}
