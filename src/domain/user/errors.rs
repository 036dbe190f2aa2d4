//! User domain errors.

use thiserror::Error;

use crate::domain::foundation::UserId;

/// Errors raised by user account operations.
#[derive(Debug, Clone, Error)]
pub enum UserError {
    /// Signup with an email that is already registered (exact match).
    #[error("Email already registered")]
    Conflict,

    /// Login failure. Deliberately identical for "no such user" and
    /// "wrong password" to avoid user-enumeration leakage.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No user with the given id.
    #[error("User {0} not found")]
    NotFound(UserId),

    /// Password below the minimum length.
    #[error("Password must be at least {min_length} characters")]
    WeakPassword { min_length: usize },

    /// Hashing failed (never carries the plaintext).
    #[error("Failed to hash password")]
    PasswordHash,

    /// Store-level failure.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl UserError {
    pub fn storage(message: impl Into<String>) -> Self {
        UserError::Storage(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_errors_share_one_message() {
        // Both failure modes must render identically to clients.
        assert_eq!(
            UserError::InvalidCredentials.to_string(),
            "Invalid credentials"
        );
    }

    #[test]
    fn not_found_names_the_user() {
        let id = UserId::new();
        assert!(UserError::NotFound(id).to_string().contains(&id.to_string()));
    }
}
