//! HTTP handlers for checkout and payment reconciliation.

use axum::body::Bytes;
use axum::extract::{Json, Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::AppState;
use crate::application::handlers::subscription::{CreateCheckoutCommand, ProcessWebhookCommand};
use crate::domain::payment::WebhookError;

use super::dto::{CheckoutRequest, CheckoutResponse, SessionStatusResponse, WebhookAck};

/// POST /api/subscription/checkout
pub async fn create_checkout(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<CheckoutRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .create_checkout_handler()
        .handle(CreateCheckoutCommand {
            user_id: user.id,
            email: user.email,
            package_id: request.package_id,
            origin_url: request.origin_url,
        })
        .await?;

    Ok(Json(CheckoutResponse::from(result)))
}

/// GET /api/subscription/status/:session_id - the pull trigger.
pub async fn session_status(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let status = state.poll_status_handler().handle(&session_id).await?;
    Ok(Json(SessionStatusResponse::from(status)))
}

/// POST /api/webhook/stripe - the push trigger.
///
/// Takes the raw body: the signature covers the exact bytes Stripe
/// sent, so the payload must not pass through JSON extraction first.
pub async fn stripe_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let signature = headers
        .get("Stripe-Signature")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            ApiError::from(WebhookError::malformed_header("missing Stripe-Signature"))
        })?;

    let handler = state.webhook_handler()?;
    handler
        .handle(ProcessWebhookCommand {
            payload: body.to_vec(),
            signature: signature.to_string(),
        })
        .await?;

    Ok((StatusCode::OK, Json(WebhookAck { received: true })))
}
