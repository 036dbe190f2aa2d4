//! JSON request/response types for the auth endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::auth::{LoginResult, SignupResult};

#[derive(Debug, Clone, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SignupResponse {
    pub token: String,
    pub user_id: String,
    /// Always true at signup; the client routes straight to checkout.
    pub needs_subscription: bool,
}

impl From<SignupResult> for SignupResponse {
    fn from(result: SignupResult) -> Self {
        Self {
            token: result.token,
            user_id: result.user.id.to_string(),
            needs_subscription: !result.user.has_active_subscription(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user_id: String,
    pub subscription_status: String,
    pub setup_completed: bool,
}

impl From<LoginResult> for LoginResponse {
    fn from(result: LoginResult) -> Self {
        Self {
            token: result.token,
            user_id: result.user.id.to_string(),
            subscription_status: result.user.subscription_status.as_str().to_string(),
            setup_completed: result.user.setup_completed,
        }
    }
}
