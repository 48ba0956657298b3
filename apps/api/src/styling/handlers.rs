use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::forms::MultipartForm;
use crate::models::daily::DailyInputRow;
use crate::models::suggestion::SuggestionRow;
use crate::state::AppState;
use crate::styling::form::DailyRequest;
use crate::styling::service::{
    run_daily, submit_feedback, suggestion_detail, DailyOutcome, FeedbackRequest,
    FeedbackResponse, SuggestionDetail,
};
use crate::styling::store;

/// POST /api/v1/daily (multipart)
pub async fn handle_daily(
    State(state): State<AppState>,
    user: AuthUser,
    multipart: Multipart,
) -> Result<(StatusCode, Json<DailyOutcome>), AppError> {
    let form = MultipartForm::read(multipart).await?;
    let req = DailyRequest::from_form(&form)?;
    let outcome = run_daily(&state, user.id, req).await?;
    Ok((StatusCode::CREATED, Json(outcome)))
}

/// GET /api/v1/daily
pub async fn handle_recent_daily(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<DailyInputRow>>, AppError> {
    Ok(Json(store::recent_daily_inputs(&state.db, user.id).await?))
}

/// GET /api/v1/suggestions
pub async fn handle_list_suggestions(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<SuggestionRow>>, AppError> {
    Ok(Json(store::list_suggestions(&state.db, user.id).await?))
}

/// GET /api/v1/suggestions/:id
pub async fn handle_suggestion_detail(
    State(state): State<AppState>,
    user: AuthUser,
    Path(suggestion_id): Path<Uuid>,
) -> Result<Json<SuggestionDetail>, AppError> {
    Ok(Json(suggestion_detail(&state, user.id, suggestion_id).await?))
}

/// POST /api/v1/suggestions/:id/feedback
pub async fn handle_feedback(
    State(state): State<AppState>,
    user: AuthUser,
    Path(suggestion_id): Path<Uuid>,
    Json(req): Json<FeedbackRequest>,
) -> Result<Json<FeedbackResponse>, AppError> {
    Ok(Json(
        submit_feedback(&state, user.id, suggestion_id, &req).await?,
    ))
}
