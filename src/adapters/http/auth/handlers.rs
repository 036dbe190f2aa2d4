//! HTTP handlers for the auth endpoints.

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::AppState;
use crate::application::handlers::auth::{LoginCommand, SignupCommand};

use super::dto::{LoginRequest, LoginResponse, SignupRequest, SignupResponse};

/// POST /api/auth/signup
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .signup_handler()
        .handle(SignupCommand {
            email: request.email,
            password: request.password,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(SignupResponse::from(result))))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .login_handler()
        .handle(LoginCommand {
            email: request.email,
            password: request.password,
        })
        .await?;

    Ok(Json(LoginResponse::from(result)))
}
