//! API error mapping.
//!
//! Every fallible route returns `ApiError`; this module is the single
//! place domain errors become HTTP statuses and JSON bodies.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::application::handlers::subscription::ProcessWebhookError;
use crate::domain::auth::AuthError;
use crate::domain::payment::{PaymentError, WebhookError};
use crate::domain::user::UserError;
use crate::ports::{AiError, FinanceError};

/// JSON error body: `{"error": ..., "code": ...}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: &'static str,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                error: message.into(),
                code,
            },
        }
    }

    fn internal(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
            message,
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(code = self.body.code, error = %self.body.error, "request failed");
        }
        (self.status, Json(self.body)).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match &err {
            UserError::Conflict => {
                Self::new(StatusCode::BAD_REQUEST, "EMAIL_TAKEN", err.to_string())
            }
            UserError::InvalidCredentials => Self::new(
                StatusCode::UNAUTHORIZED,
                "INVALID_CREDENTIALS",
                err.to_string(),
            ),
            UserError::WeakPassword { .. } => {
                Self::new(StatusCode::BAD_REQUEST, "WEAK_PASSWORD", err.to_string())
            }
            UserError::NotFound(_) => {
                Self::new(StatusCode::NOT_FOUND, "USER_NOT_FOUND", err.to_string())
            }
            UserError::PasswordHash | UserError::Storage(_) => Self::internal(err.to_string()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match &err {
            AuthError::Unauthenticated => Self::new(
                StatusCode::UNAUTHORIZED,
                "UNAUTHENTICATED",
                err.to_string(),
            ),
            AuthError::TokenExpired => {
                Self::new(StatusCode::UNAUTHORIZED, "TOKEN_EXPIRED", err.to_string())
            }
            AuthError::InvalidToken => {
                Self::new(StatusCode::UNAUTHORIZED, "INVALID_TOKEN", err.to_string())
            }
            AuthError::UserNotFound => {
                Self::new(StatusCode::UNAUTHORIZED, "USER_NOT_FOUND", err.to_string())
            }
            AuthError::SubscriptionRequired => Self::new(
                StatusCode::FORBIDDEN,
                "SUBSCRIPTION_REQUIRED",
                err.to_string(),
            ),
            AuthError::Issuance(_) | AuthError::Backend(_) => Self::internal(err.to_string()),
        }
    }
}

impl From<PaymentError> for ApiError {
    fn from(err: PaymentError) -> Self {
        match &err {
            PaymentError::UnknownPackage(_) => {
                Self::new(StatusCode::BAD_REQUEST, "UNKNOWN_PACKAGE", err.to_string())
            }
            PaymentError::ProviderUnconfigured => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "PROVIDER_UNCONFIGURED",
                err.to_string(),
            ),
            PaymentError::SessionNotFound(_) => {
                Self::new(StatusCode::NOT_FOUND, "SESSION_NOT_FOUND", err.to_string())
            }
            PaymentError::Provider(_) | PaymentError::Storage(_) => {
                Self::internal(err.to_string())
            }
        }
    }
}

impl From<WebhookError> for ApiError {
    fn from(err: WebhookError) -> Self {
        // All verification failures are 400s; the provider retries on
        // 5xx, which a permanently bad signature would never satisfy.
        Self::new(StatusCode::BAD_REQUEST, "INVALID_WEBHOOK", err.to_string())
    }
}

impl From<ProcessWebhookError> for ApiError {
    fn from(err: ProcessWebhookError) -> Self {
        match err {
            ProcessWebhookError::Webhook(e) => e.into(),
            ProcessWebhookError::Payment(e) => e.into(),
        }
    }
}

impl From<FinanceError> for ApiError {
    fn from(err: FinanceError) -> Self {
        Self::internal(err.to_string())
    }
}

impl From<AiError> for ApiError {
    fn from(err: AiError) -> Self {
        Self::internal(err.to_string())
    }
}
