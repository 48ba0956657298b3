//! Page shell, notices and the HTML error type used by page handlers.

use axum::response::{Html, IntoResponse, Redirect, Response};

use crate::errors::AppError;
use crate::views::filters::escape_html;

/// Wraps page content in the shared shell. `user_email` switches the nav
/// between the signed-in and anonymous variants.
pub fn page(title: &str, user_email: Option<&str>, body: &str) -> Html<String> {
    let nav = match user_email {
        Some(email) => format!(
            r#"<a href="/dashboard">Dashboard</a><a href="/daily-input">Daily</a><a href="/profile">Profile</a><span class="muted" style="margin-left:18px">{}</span><a href="/logout">Log out</a>"#,
            escape_html(email)
        ),
        None => r#"<a href="/login">Log in</a><a href="/signup">Sign up</a>"#.to_string(),
    };

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} | The Oracle</title>
    <link rel="stylesheet" href="/static/oracle.css">
</head>
<body>
    <header>
        <a class="brand" href="/">THE ORACLE</a>
        <nav>{nav}</nav>
    </header>
    <main>
{body}
    </main>
    <script src="/static/oracle.js"></script>
</body>
</html>"#,
        title = escape_html(title),
    ))
}

pub fn error_notice(message: &str) -> String {
    format!(r#"<div class="notice error">{}</div>"#, escape_html(message))
}

pub fn info_notice(message: &str) -> String {
    format!(r#"<div class="notice info">{}</div>"#, escape_html(message))
}

/// Radio buttons for a fixed choice set.
pub fn radio_group(name: &str, choices: &[(&str, &str)], selected: &str) -> String {
    let mut html = String::from("<fieldset>");
    for (value, label) in choices {
        let checked = if *value == selected { " checked" } else { "" };
        html.push_str(&format!(
            r#"<label><input type="radio" name="{name}" value="{value}"{checked}> {label}</label>"#,
            name = escape_html(name),
            value = escape_html(value),
            label = escape_html(label),
        ));
    }
    html.push_str("</fieldset>");
    html
}

/// Error from a page handler. Missing sessions go to the login page; other
/// errors render as an HTML page with the error's status.
#[derive(Debug)]
pub struct PageError(pub AppError);

impl From<AppError> for PageError {
    fn from(e: AppError) -> Self {
        PageError(e)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        if matches!(self.0, AppError::Unauthorized(_)) {
            return Redirect::to("/login").into_response();
        }
        let status = self.0.status();
        let body = format!(
            r#"<div class="card"><h1>{}</h1>{}<a class="button" href="/dashboard">Back to dashboard</a></div>"#,
            status.canonical_reason().unwrap_or("Error"),
            error_notice(&self.0.public_message()),
        );
        (status, page("Something went wrong", None, &body)).into_response()
    }
}

pub type PageResult = Result<Response, PageError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_page_escapes_title_and_email() {
        let Html(html) = page("<Profile>", Some("a&b@example.com"), "<p>body</p>");
        assert!(html.contains("<title>&lt;Profile&gt; | The Oracle</title>"));
        assert!(html.contains("a&amp;b@example.com"));
        assert!(html.contains("<p>body</p>"));
        assert!(html.contains(r#"href="/logout""#));
    }

    #[test]
    fn test_anonymous_nav() {
        let Html(html) = page("Welcome", None, "");
        assert!(html.contains(r#"href="/login""#));
        assert!(!html.contains("/logout"));
    }

    #[test]
    fn test_radio_group_marks_selection() {
        let html = radio_group("undertone", &[("Warm", "Warm"), ("Cool", "Cool")], "Cool");
        assert!(html.contains(r#"value="Cool" checked"#));
        assert!(!html.contains(r#"value="Warm" checked"#));
    }

    #[test]
    fn test_unauthorized_page_error_redirects() {
        let response = PageError(AppError::Unauthorized("no session".into())).into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()["location"], "/login");
    }

    #[test]
    fn test_not_found_page_error_renders_html() {
        let response = PageError(AppError::NotFound("Suggestion x not found".into())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
