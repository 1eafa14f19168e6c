//! Administrator password hashing (Argon2id, PHC string format)

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::AppError;

pub const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Debug, Clone, Default)]
pub struct PasswordService;

impl PasswordService {
    pub fn new() -> Self {
        Self
    }

    /// Hash with a fresh random salt
    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::internal(anyhow::anyhow!("argon2 hashing failed: {e}")))?;
        Ok(hash.to_string())
    }

    /// `InvalidCredentials` on mismatch; a stored hash that does not parse is
    /// an internal error
    pub fn verify_or_error(&self, password: &str, stored_hash: &str) -> Result<(), AppError> {
        let parsed = PasswordHash::new(stored_hash)
            .map_err(|e| AppError::internal(anyhow::anyhow!("stored hash is malformed: {e}")))?;

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .map_err(|_| AppError::InvalidCredentials)
    }
}

/// Reject blank passwords and passwords shorter than [`MIN_PASSWORD_LENGTH`]
pub fn validate_password_strength(password: &str) -> Result<(), AppError> {
    if password.trim().is_empty() {
        return Err(AppError::validation("Password is required"));
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AppError::validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )));
    }
    Ok(())
}
