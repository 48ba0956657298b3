use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::profile::StyleProfile;
use crate::profile::questionnaire::{
    choice_label, questions, ProfileAnswers, Question, Section, BUDGETS, CLIMATES,
    CONTRAST_LEVELS, FACE_DETAILS, SHOPPING_BEHAVIORS, UNDERTONES, WARDROBE_PHASES,
};
use crate::profile::service::save_style_profile;
use crate::profile::store::find_profile;
use crate::state::AppState;
use crate::styling::service::MISSING_PROFILE;
use crate::views::filters::{escape_html, linebreaks, strip_markdown};
use crate::views::layout::{error_notice, info_notice, page, radio_group, PageResult};

#[derive(Debug, Default, Deserialize)]
pub struct ProfileQuery {
    #[serde(default)]
    pub missing: Option<String>,
}

fn section_title(section: Section) -> &'static str {
    match section {
        Section::Appearance => "Appearance",
        Section::StyleIdentity => "Style preferences",
        Section::Lifestyle => "Lifestyle",
    }
}

fn question_html(question: &Question, answers: &ProfileAnswers) -> String {
    let current = answers.field(question.key);
    let input = if question.choices.is_empty() {
        format!(
            r#"<textarea name="{key}" placeholder="{placeholder}">{value}</textarea>"#,
            key = question.key,
            placeholder = escape_html(question.placeholder.unwrap_or("")),
            value = escape_html(&current),
        )
    } else {
        let choices: Vec<(&str, &str)> =
            question.choices.iter().map(|c| (c.value, c.label)).collect();
        radio_group(question.key, &choices, &current)
    };
    format!(
        "<label>{}</label>\n{input}",
        escape_html(question.label)
    )
}

fn questionnaire_form(answers: &ProfileAnswers, notice: &str) -> String {
    let mut body = String::new();
    let mut section = None;
    for question in questions() {
        if section != Some(question.section) {
            if section.is_some() {
                body.push_str("</div>");
            }
            body.push_str(&format!(
                r#"<div class="card"><h2>{}</h2>"#,
                section_title(question.section)
            ));
            section = Some(question.section);
        }
        body.push_str(&question_html(&question, answers));
    }
    if section.is_some() {
        body.push_str("</div>");
    }

    format!(
        r#"<h1>Your style profile</h1>
{notice}
<form method="post" action="/profile">
{body}
<button type="submit">Save and read my archetype</button>
</form>"#
    )
}

fn saved_page(profile: &StyleProfile, archetype: &str) -> String {
    let a = &profile.appearance;
    let s = &profile.style_identity;
    let l = &profile.lifestyle;
    let rows = [
        ("Skin tone", a.skin_tone.clone()),
        ("Undertone", choice_label(UNDERTONES, &a.undertone)),
        ("Contrast", choice_label(CONTRAST_LEVELS, &a.contrast_level)),
        (
            "Details near the face",
            choice_label(FACE_DETAILS, &s.face_detail_preference),
        ),
        ("Archetypes", s.archetypes.join(", ")),
        ("Climate", choice_label(CLIMATES, &l.climate)),
        ("Wardrobe", choice_label(WARDROBE_PHASES, &l.wardrobe_phase)),
        ("Shopping", choice_label(SHOPPING_BEHAVIORS, &l.shopping_behavior)),
        ("Budget", choice_label(BUDGETS, &l.budget_preference)),
    ];
    let table: String = rows
        .iter()
        .map(|(k, v)| format!("<tr><th>{k}</th><td>{}</td></tr>", escape_html(v)))
        .collect();

    format!(
        r#"<div class="card">
    <h1>Your archetype</h1>
    <div class="prose">{}</div>
</div>
<div class="card"><h2>What you told us</h2><table>{table}</table></div>
<a class="button" href="/daily-input">Style today</a>"#,
        linebreaks(&strip_markdown(archetype))
    )
}

/// GET /profile
pub async fn profile_page(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    Query(query): Query<ProfileQuery>,
) -> PageResult {
    let Some(user) = user else {
        return Ok(Redirect::to("/login").into_response());
    };
    let answers = find_profile(&state.db, user.id)
        .await?
        .map(|row| ProfileAnswers::from(&row.profile()))
        .unwrap_or_default();
    let notice = if query.missing.is_some() {
        info_notice(MISSING_PROFILE)
    } else {
        String::new()
    };
    Ok(page(
        "Style profile",
        Some(&user.email),
        &questionnaire_form(&answers, &notice),
    )
    .into_response())
}

/// POST /profile
pub async fn profile_submit(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    Form(answers): Form<ProfileAnswers>,
) -> PageResult {
    let Some(user) = user else {
        return Ok(Redirect::to("/login").into_response());
    };
    let rerender = |message: String| -> Response {
        page(
            "Style profile",
            Some(&user.email),
            &questionnaire_form(&answers, &error_notice(&message)),
        )
        .into_response()
    };

    let profile = match answers.validate() {
        Ok(profile) => profile,
        Err(e) => return Ok(rerender(e.public_message())),
    };

    match save_style_profile(&state, user.id, &profile).await {
        Ok(row) => Ok(page(
            "Profile saved",
            Some(&user.email),
            &saved_page(&profile, row.style_archetype.as_deref().unwrap_or("")),
        )
        .into_response()),
        Err(e @ (AppError::Llm(_) | AppError::Validation(_))) => Ok(rerender(format!(
            "Could not save profile: {}",
            e.public_message()
        ))),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::questionnaire::sample_answers;

    #[test]
    fn test_form_prefills_answers() {
        let html = questionnaire_form(&sample_answers(), "");
        assert!(html.contains(r#"value="Mostly cold" checked"#));
        assert!(html.contains(r#"name="texture_notes" placeholder="#));
        assert!(html.contains(">Soft drape</textarea>"));
        assert_eq!(html.matches(r#"<div class="card">"#).count(), 3);
    }

    #[test]
    fn test_saved_page_uses_labels() {
        let profile = sample_answers().validate().unwrap();
        let html = saved_page(&profile, "**Quiet Authority**\nYou move with intent.");
        assert!(html.contains("Quiet Authority<br>"));
        assert!(html.contains("Minimal: I love owning less"));
    }
}
