use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::profile::{StyleProfile, StyleProfileRow};
use crate::profile::questionnaire::{questions, ProfileAnswers, Question};
use crate::profile::service::save_style_profile;
use crate::profile::store::find_profile;
use crate::state::AppState;

#[derive(Serialize)]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub profile: StyleProfile,
    pub style_archetype: Option<String>,
    pub summary: String,
    pub updated_at: DateTime<Utc>,
}

impl From<&StyleProfileRow> for ProfileResponse {
    fn from(row: &StyleProfileRow) -> Self {
        Self {
            profile: row.profile(),
            style_archetype: row.style_archetype.clone(),
            summary: row.raw_text.clone(),
            updated_at: row.updated_at,
        }
    }
}

/// GET /api/v1/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ProfileResponse>, AppError> {
    let row = find_profile(&state.db, user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("No style profile yet".to_string()))?;
    Ok(Json(ProfileResponse::from(&row)))
}

/// PUT /api/v1/profile
pub async fn handle_put_profile(
    State(state): State<AppState>,
    user: AuthUser,
    Json(answers): Json<ProfileAnswers>,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = answers.validate()?;
    let row = save_style_profile(&state, user.id, &profile).await?;
    Ok(Json(ProfileResponse::from(&row)))
}

/// GET /api/v1/profile/questions
pub async fn handle_questions() -> Json<Vec<Question>> {
    Json(questions())
}
