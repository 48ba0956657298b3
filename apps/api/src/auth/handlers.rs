use axum::{extract::State, http::StatusCode, Json};

use crate::auth::accounts::{
    find_user, login, signup, LoginRequest, SessionResponse, SignupRequest,
};
use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::user::PublicUser;
use crate::state::AppState;

/// POST /api/v1/auth/signup
pub async fn handle_signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), AppError> {
    let session = signup(&state.db, &state.config, &req).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

/// POST /api/v1/auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    Ok(Json(login(&state.db, &state.config, &req).await?))
}

/// GET /api/v1/auth/me
pub async fn handle_me(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<PublicUser>, AppError> {
    let row = find_user(&state.db, user.id).await?;
    Ok(Json(PublicUser::from(&row)))
}
