//! Stylesheet and script for the HTML pages, embedded at compile time.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

const ORACLE_CSS: &str = include_str!("../../static/oracle.css");
const ORACLE_JS: &str = include_str!("../../static/oracle.js");

const CACHE_CONTROL: &str = "public, max-age=3600";

/// GET /static/oracle.css
pub async fn serve_css() -> Response {
    (
        StatusCode::OK,
        [("content-type", "text/css"), ("cache-control", CACHE_CONTROL)],
        ORACLE_CSS,
    )
        .into_response()
}

/// GET /static/oracle.js
pub async fn serve_js() -> Response {
    (
        StatusCode::OK,
        [
            ("content-type", "application/javascript"),
            ("cache-control", CACHE_CONTROL),
        ],
        ORACLE_JS,
    )
        .into_response()
}
