//! HS256 session tokens.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub exp: usize,
}

pub fn issue_token(
    secret: &str,
    user_id: Uuid,
    email: &str,
    ttl_hours: i64,
) -> Result<String, AppError> {
    let exp = (Utc::now() + Duration::hours(ttl_hours)).timestamp().max(0) as usize;
    let claims = Claims {
        sub: user_id,
        email: email.to_string(),
        exp,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to sign session token: {e}")))
}

pub fn verify_token(secret: &str, token: &str) -> Result<Claims, AppError> {
    let validation = Validation::new(Algorithm::HS256);
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|err| AppError::Unauthorized(format!("invalid token: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_verify() {
        let user_id = Uuid::new_v4();
        let token = issue_token("secret", user_id, "ada@example.com", 1).unwrap();
        let claims = verify_token("secret", &token).unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.email, "ada@example.com");
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = issue_token("secret", Uuid::new_v4(), "ada@example.com", 1).unwrap();
        let err = verify_token("other", &token).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let token = issue_token("secret", Uuid::new_v4(), "ada@example.com", -2).unwrap();
        assert!(verify_token("secret", &token).is_err());
    }
}
