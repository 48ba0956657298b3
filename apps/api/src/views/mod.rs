//! Server-rendered pages. Each page handler reuses the service layer behind
//! the JSON API and renders the result as HTML.

pub mod account;
pub mod daily;
pub mod dashboard;
pub mod filters;
pub mod layout;
pub mod outfit;
pub mod profile;
pub mod static_assets;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(account::landing_page))
        .route("/login", get(account::login_page).post(account::login_submit))
        .route("/signup", get(account::signup_page).post(account::signup_submit))
        .route("/logout", get(account::logout).post(account::logout))
        .route(
            "/dashboard",
            get(dashboard::dashboard_page).post(dashboard::dashboard_upload),
        )
        .route("/profile", get(profile::profile_page).post(profile::profile_submit))
        .route("/daily-input", get(daily::daily_page).post(daily::daily_submit))
        .route("/outfit/:id", get(outfit::outfit_page))
        .route("/feedback/:id", post(outfit::feedback_submit))
        .route("/static/oracle.css", get(static_assets::serve_css))
        .route("/static/oracle.js", get(static_assets::serve_js))
}
