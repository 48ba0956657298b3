use axum::{
    extract::State,
    http::{header::SET_COOKIE, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};

use crate::auth::accounts::{login, signup, LoginRequest, SignupRequest};
use crate::auth::{clear_session_cookie, session_cookie, AuthUser};
use crate::errors::AppError;
use crate::state::AppState;
use crate::views::filters::escape_html;
use crate::views::layout::{error_notice, page};

/// GET /
pub async fn landing_page(user: Option<AuthUser>) -> Response {
    if user.is_some() {
        return Redirect::to("/dashboard").into_response();
    }
    page(
        "Welcome",
        None,
        r#"<div class="card">
    <h1>The Oracle</h1>
    <p>A stylist that reads your profile, knows your wardrobe and listens to how you want to feel today.</p>
    <a class="button" href="/signup">Request your reading</a>
    <p class="muted">Already have an account? <a href="/login">Log in</a>.</p>
</div>"#,
    )
    .into_response()
}

fn login_form(email: &str, error: Option<&str>) -> Html<String> {
    let body = format!(
        r#"<div class="card">
    <h1>Log in</h1>
    {error}
    <form method="post" action="/login">
        <label for="email">Email</label>
        <input type="email" id="email" name="email" value="{email}" required>
        <label for="password">Password</label>
        <input type="password" id="password" name="password" required>
        <button type="submit">Log in</button>
    </form>
    <p class="muted">New here? <a href="/signup">Sign up with an access code</a>.</p>
</div>"#,
        error = error.map(error_notice).unwrap_or_default(),
        email = escape_html(email),
    );
    page("Log in", None, &body)
}

fn signup_form(email: &str, error: Option<&str>) -> Html<String> {
    let body = format!(
        r#"<div class="card">
    <h1>Sign up</h1>
    {error}
    <form method="post" action="/signup">
        <label for="email">Email</label>
        <input type="email" id="email" name="email" value="{email}" required>
        <label for="password">Password</label>
        <input type="password" id="password" name="password" required>
        <label for="invite_code">Access Code</label>
        <input type="text" id="invite_code" name="invite_code" placeholder="Enter your access code" autocomplete="off" maxlength="64" required>
        <button type="submit">Create account</button>
    </form>
</div>"#,
        error = error.map(error_notice).unwrap_or_default(),
        email = escape_html(email),
    );
    page("Sign up", None, &body)
}

/// Sets the session cookie and sends the browser to the dashboard.
fn start_session(state: &AppState, token: &str) -> Response {
    (
        [(SET_COOKIE, session_cookie(token, state.config.session_ttl_hours))],
        Redirect::to("/dashboard"),
    )
        .into_response()
}

/// GET /login
pub async fn login_page() -> Html<String> {
    login_form("", None)
}

/// POST /login
pub async fn login_submit(
    State(state): State<AppState>,
    Form(req): Form<LoginRequest>,
) -> Result<Response, AppError> {
    match login(&state.db, &state.config, &req).await {
        Ok(session) => Ok(start_session(&state, &session.token)),
        Err(e @ (AppError::Unauthorized(_) | AppError::Validation(_))) => Ok((
            e.status(),
            login_form(&req.email, Some(&e.public_message())),
        )
            .into_response()),
        Err(e) => Err(e),
    }
}

/// GET /signup
pub async fn signup_page() -> Html<String> {
    signup_form("", None)
}

/// POST /signup
pub async fn signup_submit(
    State(state): State<AppState>,
    Form(req): Form<SignupRequest>,
) -> Result<Response, AppError> {
    match signup(&state.db, &state.config, &req).await {
        Ok(session) => Ok(start_session(&state, &session.token)),
        Err(e @ (AppError::Validation(_) | AppError::Conflict(_))) => Ok((
            e.status(),
            signup_form(&req.email, Some(&e.public_message())),
        )
            .into_response()),
        Err(e) => Err(e),
    }
}

/// GET /logout
pub async fn logout() -> impl IntoResponse {
    (
        StatusCode::SEE_OTHER,
        [
            (SET_COOKIE, clear_session_cookie()),
            (axum::http::header::LOCATION, "/login".to_string()),
        ],
    )
}
