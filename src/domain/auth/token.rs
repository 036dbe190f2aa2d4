//! Stateless bearer-token service.
//!
//! Issues and validates signed, time-limited credentials. Possession is
//! sufficient proof of identity - there is no server-side revocation list.
//! Validation is pure CPU: no I/O, never blocks.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::UserId;

use super::AuthError;

/// Token lifetime: 30 days.
const TOKEN_TTL_DAYS: i64 = 30;

/// Claims carried inside a bearer token.
///
/// Authorization decisions never trust these beyond identity: the gate
/// re-fetches the live user record, since subscription status can change
/// after issuance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - the user id.
    pub sub: UserId,
    /// Email at issuance time.
    pub email: String,
    /// Issued at (unix seconds).
    pub iat: i64,
    /// Expiration (unix seconds).
    pub exp: i64,
}

/// Issues and validates HS256-signed bearer tokens.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Creates a service from the process-wide signing secret.
    pub fn new(secret: &SecretString) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(bytes),
            decoding_key: DecodingKey::from_secret(bytes),
            validation: Validation::default(),
        }
    }

    /// Issues a credential for a user. No side effects.
    pub fn issue(&self, user_id: UserId, email: &str) -> Result<String, AuthError> {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: user_id,
            email: email.to_string(),
            iat: now,
            exp: now + TOKEN_TTL_DAYS * 24 * 60 * 60,
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Issuance(e.to_string()))
    }

    /// Validates a credential and returns its claims.
    ///
    /// Fails with `TokenExpired` past `exp`, `InvalidToken` on signature or
    /// structural failure.
    pub fn validate(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            })
    }
}
