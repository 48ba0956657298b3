use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::forms::MultipartForm;
use crate::models::wardrobe::WardrobeItemView;
use crate::state::AppState;
use crate::wardrobe::service::{self, FromDailyRequest, UploadRequest};
use crate::wardrobe::store;

#[derive(Serialize)]
pub struct AddedItemResponse {
    pub message: String,
    pub item: WardrobeItemView,
}

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub message: &'static str,
}

#[derive(Serialize)]
pub struct FavoriteResponse {
    pub status: &'static str,
    pub favorite: bool,
}

/// GET /api/v1/wardrobe
pub async fn handle_list(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<WardrobeItemView>>, AppError> {
    let items = store::list_items(&state.db, user.id).await?;
    Ok(Json(items.iter().map(WardrobeItemView::from).collect()))
}

/// POST /api/v1/wardrobe (multipart)
pub async fn handle_upload(
    State(state): State<AppState>,
    user: AuthUser,
    multipart: Multipart,
) -> Result<(StatusCode, Json<WardrobeItemView>), AppError> {
    let form = MultipartForm::read(multipart).await?;
    let req = UploadRequest::from_form(&form)?;
    let row = service::add_item(&state, user.id, req).await?;
    Ok((StatusCode::CREATED, Json(WardrobeItemView::from(&row))))
}

/// POST /api/v1/wardrobe/from-daily (multipart)
pub async fn handle_add_from_daily(
    State(state): State<AppState>,
    user: AuthUser,
    multipart: Multipart,
) -> Result<(StatusCode, Json<AddedItemResponse>), AppError> {
    let form = MultipartForm::read(multipart).await?;
    let req = FromDailyRequest::from_form(&form)?;
    let row = service::add_from_daily(&state, user.id, req).await?;
    Ok((
        StatusCode::CREATED,
        Json(AddedItemResponse {
            message: format!("'{}' added to your wardrobe!", row.name),
            item: WardrobeItemView::from(&row),
        }),
    ))
}

/// DELETE /api/v1/wardrobe/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(item_id): Path<Uuid>,
) -> Result<Json<StatusResponse>, AppError> {
    service::delete_item(&state, user.id, item_id).await?;
    Ok(Json(StatusResponse {
        status: "success",
        message: "Item deleted successfully.",
    }))
}

/// GET /api/v1/wardrobe/:id/image
pub async fn handle_image(
    State(state): State<AppState>,
    user: AuthUser,
    Path(item_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let (bytes, content_type) = service::load_image(&state, user.id, item_id).await?;
    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (header::CACHE_CONTROL, "private, max-age=3600".to_string()),
        ],
        bytes,
    ))
}

/// POST /api/v1/wardrobe/:id/favorite
pub async fn handle_toggle_favorite(
    State(state): State<AppState>,
    user: AuthUser,
    Path(item_id): Path<Uuid>,
) -> Result<Json<FavoriteResponse>, AppError> {
    let row = store::toggle_favorite(&state.db, user.id, item_id).await?;
    Ok(Json(FavoriteResponse {
        status: "success",
        favorite: row.is_favorite,
    }))
}

/// POST /api/v1/wardrobe/:id/worn
pub async fn handle_mark_worn(
    State(state): State<AppState>,
    user: AuthUser,
    Path(item_id): Path<Uuid>,
) -> Result<Json<WardrobeItemView>, AppError> {
    let row = store::mark_worn(&state.db, user.id, item_id).await?;
    Ok(Json(WardrobeItemView::from(&row)))
}
