//! Routers for subscription and webhook endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use crate::adapters::http::AppState;

use super::handlers::{create_checkout, session_status, stripe_webhook};

/// `/subscription` routes; bearer credential required.
pub fn subscription_routes() -> Router<AppState> {
    Router::new()
        .route("/checkout", post(create_checkout))
        .route("/status/:session_id", get(session_status))
}

/// `/webhook` routes. No bearer auth: the provider authenticates with
/// its signature header instead.
pub fn webhook_routes() -> Router<AppState> {
    Router::new().route("/stripe", post(stripe_webhook))
}
