use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand_core::{OsRng, RngCore};
use std::sync::OnceLock;
use uuid::Uuid;

use crate::types::error::AppError;

/// Raw bytes behind a verification token; hex doubles it to 64 chars.
pub const VERIFICATION_TOKEN_BYTES: usize = 32;

pub fn new_id() -> Uuid {
    Uuid::new_v4()
}

pub fn new_verification_token() -> String {
    let mut buf = [0u8; VERIFICATION_TOKEN_BYTES];
    let mut rng = OsRng;
    rng.fill_bytes(&mut buf);
    hex::encode(buf)
}

pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let mut rng = OsRng;
    let salt = SaltString::generate(&mut rng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed = PasswordHash::new(hash)?;
    Ok(Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok())
}

/// Compared against when the email is unknown, so a miss costs as much as a
/// wrong password.
fn dummy_hash() -> &'static str {
    static DUMMY: OnceLock<String> = OnceLock::new();
    DUMMY.get_or_init(|| hash_password("timetrack-dummy-password").unwrap_or_default())
}

/// Argon2 is CPU bound; keep it off the request workers.
pub async fn hash_password_blocking(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::Internal(format!("hash task failed: {e}")))?
        .map_err(|e| AppError::Internal(format!("password hashing failed: {e}")))
}

/// `None` hash means "no such user": still burn one verification, then fail.
pub async fn verify_password_blocking(password: String, hash: Option<String>) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || match hash {
        Some(h) => verify_password(&password, &h).unwrap_or(false),
        None => {
            let _ = verify_password(&password, dummy_hash());
            false
        }
    })
    .await
    .map_err(|e| AppError::Internal(format!("verify task failed: {e}")))
}
