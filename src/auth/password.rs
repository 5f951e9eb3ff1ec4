use std::sync::OnceLock;
use actix_web::web;
use bcrypt::{hash, verify};
use crate::errors::ApiError;

pub const MIN_PASSWORD_LEN: usize = 8;

static DUMMY_HASH: OnceLock<Option<String>> = OnceLock::new();

pub fn hash_password(password: &str, cost: u32) -> Result<String, ApiError> {
    hash(password, cost).map_err(|e| ApiError::Internal {
        operation: format!("hash password: {}", e),
    })
}

/// `hash_password` on actix's blocking thread pool; bcrypt is CPU bound.
pub async fn hash_password_blocking(password: String, cost: u32) -> Result<String, ApiError> {
    web::block(move || hash_password(&password, cost))
        .await
        .map_err(|e| ApiError::Internal { operation: format!("hash password: {}", e) })?
}

/// A malformed stored hash counts as a mismatch.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    verify(password, password_hash).unwrap_or(false)
}

/// Spends one bcrypt verification on a throwaway hash, so a login for an unknown
/// username takes as long as one with a wrong password. Always false.
pub fn dummy_verify(password: &str, cost: u32) -> bool {
    let dummy = DUMMY_HASH.get_or_init(|| hash("task-manager-dummy-password", cost).ok());
    if let Some(dummy) = dummy {
        let _ = verify(password, dummy);
    }
    false
}
