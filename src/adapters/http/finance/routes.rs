//! Routers for setup, expenses and dashboard endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use crate::adapters::http::AppState;

use super::handlers::{
    create_expense, dashboard, export_expenses, get_setup, list_expenses, save_setup,
    upload_statement,
};

/// `/user/setup` routes.
pub fn setup_routes() -> Router<AppState> {
    Router::new().route("/setup", post(save_setup).get(get_setup))
}

/// `/expenses` routes.
pub fn expense_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_expense).get(list_expenses))
        .route("/upload", post(upload_statement))
        .route("/export", get(export_expenses))
}

/// `/dashboard` routes.
pub fn dashboard_routes() -> Router<AppState> {
    Router::new().route("/", get(dashboard))
}
