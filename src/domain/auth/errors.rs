//! Authentication errors.

use thiserror::Error;

/// Failures while resolving a bearer credential.
///
/// Domain-centric: describes what went wrong from the application's
/// perspective, not the token library's.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// Authorization header missing or not `Bearer <token>`.
    #[error("Missing or malformed credential")]
    Unauthenticated,

    /// Signature check failed or required claims are absent.
    #[error("Invalid token")]
    InvalidToken,

    /// The token is past its expiry.
    #[error("Token expired")]
    TokenExpired,

    /// Token is valid but the referenced user no longer exists.
    #[error("User not found")]
    UserNotFound,

    /// The caller's subscription is not active.
    #[error("Active subscription required")]
    SubscriptionRequired,

    /// Signing failed while issuing a credential.
    #[error("Failed to issue credential: {0}")]
    Issuance(String),

    /// The user store was unreachable during resolution.
    #[error("Auth backend unavailable: {0}")]
    Backend(String),
}

impl AuthError {
    /// True if the client should re-authenticate rather than retry.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(
            self,
            AuthError::Unauthenticated
                | AuthError::InvalidToken
                | AuthError::TokenExpired
                | AuthError::UserNotFound
        )
    }
}
