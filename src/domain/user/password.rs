//! Password hashing with Argon2id.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use super::UserError;

/// Minimum password length accepted at signup.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Validates password strength before hashing.
pub fn validate_password(password: &str) -> Result<(), UserError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(UserError::WeakPassword {
            min_length: MIN_PASSWORD_LENGTH,
        });
    }
    Ok(())
}

/// Hashes a password with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, UserError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| UserError::PasswordHash)
}

/// Verifies a password against a stored hash.
///
/// Fails with the generic `InvalidCredentials` so callers cannot distinguish
/// a bad password from a malformed stored hash.
pub fn verify_password(password: &str, hash: &str) -> Result<(), UserError> {
    let parsed = PasswordHash::new(hash).map_err(|_| UserError::InvalidCredentials)?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| UserError::InvalidCredentials)
}
