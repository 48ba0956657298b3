//! Signup and login against the `users` table.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::auth::password::{check_password_strength, hash_in_background, verify_in_background};
use crate::auth::token::issue_token;
use crate::config::Config;
use crate::errors::AppError;
use crate::models::user::{PublicUser, UserRow};

#[derive(Debug, Clone, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub invite_code: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub user: PublicUser,
}

pub fn normalize_email(email: &str) -> Result<String, AppError> {
    let email = email.trim().to_lowercase();
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if !valid {
        return Err(AppError::Validation(
            "Enter a valid email address.".to_string(),
        ));
    }
    Ok(email)
}

pub fn check_invite_code(submitted: &str, expected: &str) -> Result<(), AppError> {
    if submitted.trim() != expected {
        return Err(AppError::Validation("Invalid access code.".to_string()));
    }
    Ok(())
}

pub async fn signup(
    pool: &PgPool,
    config: &Config,
    request: &SignupRequest,
) -> Result<SessionResponse, AppError> {
    check_invite_code(&request.invite_code, &config.invite_code)?;
    let email = normalize_email(&request.email)?;
    check_password_strength(&request.password).map_err(AppError::Validation)?;

    let digest = hash_in_background(request.password.clone()).await?;
    let user = sqlx::query_as::<_, UserRow>(
        r#"
        INSERT INTO users (id, email, password_hash, password_salt)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (email) DO NOTHING
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&email)
    .bind(&digest.hash)
    .bind(&digest.salt)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| {
        AppError::Conflict("A user is already registered with this email address.".to_string())
    })?;

    info!("Registered user {}", user.id);
    session_for(config, &user)
}

pub async fn login(
    pool: &PgPool,
    config: &Config,
    request: &LoginRequest,
) -> Result<SessionResponse, AppError> {
    let invalid =
        || AppError::Unauthorized("The email address and/or password you specified are not correct.".to_string());

    let email = normalize_email(&request.email).map_err(|_| invalid())?;
    let user = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(pool)
        .await?
        .ok_or_else(invalid)?;

    let matches = verify_in_background(
        request.password.clone(),
        user.password_hash.clone(),
        user.password_salt.clone(),
    )
    .await?;
    if !matches {
        return Err(invalid());
    }

    info!("User {} logged in", user.id);
    session_for(config, &user)
}

pub async fn find_user(pool: &PgPool, user_id: Uuid) -> Result<UserRow, AppError> {
    sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))
}

fn session_for(config: &Config, user: &UserRow) -> Result<SessionResponse, AppError> {
    let token = issue_token(
        &config.jwt_secret,
        user.id,
        &user.email,
        config.session_ttl_hours,
    )?;
    Ok(SessionResponse {
        token,
        user: PublicUser::from(user),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(
            normalize_email("  Ada@Example.COM ").unwrap(),
            "ada@example.com"
        );
        assert!(normalize_email("ada").is_err());
        assert!(normalize_email("@example.com").is_err());
        assert!(normalize_email("ada@localhost").is_err());
        assert!(normalize_email("a da@example.com").is_err());
    }

    #[test]
    fn test_invite_code_is_trimmed_and_exact() {
        assert!(check_invite_code(" oracle2026 ", "oracle2026").is_ok());
        let err = check_invite_code("ORACLE2026", "oracle2026").unwrap_err();
        assert_eq!(err.public_message(), "Invalid access code.");
    }
}
