//! Bearer-token authentication middleware and extractors.
//!
//! ```text
//! Request -> auth_middleware -> injects CurrentUser into extensions
//!                                      |
//!                              Handler -> RequireAuth reads it back
//! ```
//!
//! The middleware validates the token cryptographically, then re-fetches
//! the live user record. Authorization always reads current store state:
//! a token minted before payment must unlock gated routes the moment the
//! subscription flips, and a deleted account must lock out immediately,
//! without re-issuing credentials.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::adapters::http::error::ApiError;
use crate::domain::auth::{AuthError, TokenService};
use crate::domain::user::User;
use crate::ports::UserRepository;

/// State for the auth middleware.
#[derive(Clone)]
pub struct AuthGate {
    pub tokens: Arc<TokenService>,
    pub users: Arc<dyn UserRepository>,
}

impl AuthGate {
    pub fn new(tokens: Arc<TokenService>, users: Arc<dyn UserRepository>) -> Self {
        Self { tokens, users }
    }

    /// Resolves a bearer token to the live user record.
    pub async fn resolve(&self, token: &str) -> Result<User, AuthError> {
        let claims = self.tokens.validate(token)?;
        self.users
            .find_by_id(claims.sub)
            .await
            .map_err(|e| AuthError::Backend(e.to_string()))?
            .ok_or(AuthError::UserNotFound)
    }
}

/// The authenticated caller, injected into request extensions.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Validates `Authorization: Bearer <token>` and injects `CurrentUser`.
///
/// Requests without a token pass through untouched; protected handlers
/// enforce presence via the `RequireAuth` extractor. Invalid or expired
/// tokens are rejected here.
pub async fn auth_middleware(
    State(gate): State<AuthGate>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    match token {
        Some(token) => match gate.resolve(token).await {
            Ok(user) => {
                request.extensions_mut().insert(CurrentUser(user));
                next.run(request).await
            }
            Err(e) => ApiError::from(e).into_response(),
        },
        None => next.run(request).await,
    }
}

/// Extractor for handlers that require an authenticated caller.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub User);

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .map(|CurrentUser(user)| RequireAuth(user))
            .ok_or_else(|| AuthError::Unauthenticated.into())
    }
}

/// Extractor for routes gated on an active subscription.
#[derive(Debug, Clone)]
pub struct RequireSubscription(pub User);

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for RequireSubscription
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let RequireAuth(user) = RequireAuth::from_request_parts(parts, state).await?;
        if !user.has_active_subscription() {
            return Err(AuthError::SubscriptionRequired.into());
        }
        Ok(RequireSubscription(user))
    }
}
