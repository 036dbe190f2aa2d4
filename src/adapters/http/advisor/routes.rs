//! Routers for the advisor endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use crate::adapters::http::AppState;

use super::handlers::{chat, chat_history, generate_recommendations};

/// `/chat` routes.
pub fn chat_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(chat))
        .route("/history", get(chat_history))
}

/// `/recommendations` routes.
pub fn recommendation_routes() -> Router<AppState> {
    Router::new().route("/", post(generate_recommendations))
}
