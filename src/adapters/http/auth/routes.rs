//! Router for the auth endpoints.

use axum::{routing::post, Router};

use crate::adapters::http::AppState;

use super::handlers::{login, signup};

/// `/auth` routes; no credential required.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
}
