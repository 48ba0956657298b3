//! Salted, iterated SHA-256 password digests.

use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::errors::AppError;

const SALT_BYTES: usize = 16;
const ITERATIONS: u32 = 50_000;
const MIN_PASSWORD_LEN: usize = 8;

/// A stored credential: both halves are lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordDigest {
    pub hash: String,
    pub salt: String,
}

pub fn generate_salt() -> String {
    let mut salt = [0u8; SALT_BYTES];
    rand::thread_rng().fill_bytes(&mut salt);
    to_hex(&salt)
}

pub fn hash_password(password: &str) -> PasswordDigest {
    let salt = generate_salt();
    PasswordDigest {
        hash: digest(password, &salt),
        salt,
    }
}

pub fn verify_password(password: &str, hash: &str, salt: &str) -> bool {
    constant_time_eq(digest(password, salt).as_bytes(), hash.as_bytes())
}

/// Runs `hash_password` on a blocking thread; the digest is CPU-bound.
pub async fn hash_in_background(password: String) -> Result<PasswordDigest, AppError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("password hashing task failed: {e}")))
}

/// Runs `verify_password` on a blocking thread.
pub async fn verify_in_background(
    password: String,
    hash: String,
    salt: String,
) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash, &salt))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("password check task failed: {e}")))
}

/// Rejects passwords that are too short or entirely numeric.
pub fn check_password_strength(password: &str) -> Result<(), String> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(format!(
            "This password is too short. It must contain at least {MIN_PASSWORD_LEN} characters."
        ));
    }
    if password.chars().all(|c| c.is_ascii_digit()) {
        return Err("This password is entirely numeric.".to_string());
    }
    Ok(())
}

fn digest(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    let mut current = hasher.finalize();

    for _ in 1..ITERATIONS {
        let mut hasher = Sha256::new();
        hasher.update(current);
        hasher.update(salt.as_bytes());
        current = hasher.finalize();
    }

    format!("{:x}", current)
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let digest = hash_password("velvet-trench-42");
        assert_eq!(digest.hash.len(), 64);
        assert_eq!(digest.salt.len(), SALT_BYTES * 2);
        assert!(verify_password("velvet-trench-42", &digest.hash, &digest.salt));
        assert!(!verify_password("velvet-trench-43", &digest.hash, &digest.salt));
    }

    #[test]
    fn test_same_password_gets_different_salts() {
        let a = hash_password("linen-and-wool");
        let b = hash_password("linen-and-wool");
        assert_ne!(a.salt, b.salt);
        assert_ne!(a.hash, b.hash);
    }

    #[tokio::test]
    async fn test_background_hash_and_verify() {
        let digest = hash_in_background("soft armor 9".to_string()).await.unwrap();
        assert!(verify_password("soft armor 9", &digest.hash, &digest.salt));
        assert!(
            verify_in_background("soft armor 9".to_string(), digest.hash.clone(), digest.salt.clone())
                .await
                .unwrap()
        );
        assert!(
            !verify_in_background("soft armor 8".to_string(), digest.hash, digest.salt)
                .await
                .unwrap()
        );
    }

    #[test]
    fn test_password_strength_rules() {
        assert!(check_password_strength("short").is_err());
        assert!(check_password_strength("12345678901").is_err());
        assert!(check_password_strength("soft armor 9").is_ok());
    }

    #[test]
    fn test_constant_time_eq_length_mismatch() {
        assert!(!constant_time_eq(b"abc", b"abcd"));
        assert!(constant_time_eq(b"abc", b"abc"));
    }
}
