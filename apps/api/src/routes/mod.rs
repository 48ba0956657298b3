pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};

use crate::state::AppState;
use crate::{auth, profile, styling, views, wardrobe};

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.upload_max_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Accounts
        .route("/api/v1/auth/signup", post(auth::handlers::handle_signup))
        .route("/api/v1/auth/login", post(auth::handlers::handle_login))
        .route("/api/v1/auth/me", get(auth::handlers::handle_me))
        // Style profile
        .route(
            "/api/v1/profile",
            get(profile::handlers::handle_get_profile).put(profile::handlers::handle_put_profile),
        )
        .route(
            "/api/v1/profile/questions",
            get(profile::handlers::handle_questions),
        )
        // Wardrobe
        .route(
            "/api/v1/wardrobe",
            get(wardrobe::handlers::handle_list).post(wardrobe::handlers::handle_upload),
        )
        .route(
            "/api/v1/wardrobe/from-daily",
            post(wardrobe::handlers::handle_add_from_daily),
        )
        .route("/api/v1/wardrobe/:id", delete(wardrobe::handlers::handle_delete))
        .route(
            "/api/v1/wardrobe/:id/image",
            get(wardrobe::handlers::handle_image),
        )
        .route(
            "/api/v1/wardrobe/:id/favorite",
            post(wardrobe::handlers::handle_toggle_favorite),
        )
        .route(
            "/api/v1/wardrobe/:id/worn",
            post(wardrobe::handlers::handle_mark_worn),
        )
        // Daily styling
        .route(
            "/api/v1/daily",
            get(styling::handlers::handle_recent_daily).post(styling::handlers::handle_daily),
        )
        .route(
            "/api/v1/suggestions",
            get(styling::handlers::handle_list_suggestions),
        )
        .route(
            "/api/v1/suggestions/:id",
            get(styling::handlers::handle_suggestion_detail),
        )
        .route(
            "/api/v1/suggestions/:id/feedback",
            post(styling::handlers::handle_feedback),
        )
        .merge(views::page_routes())
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
