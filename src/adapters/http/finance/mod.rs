//! HTTP adapter for the financial profile features.
//!
//! - `POST /api/user/setup` / `GET /api/user/setup`
//! - `POST /api/expenses` / `GET /api/expenses`
//! - `POST /api/expenses/upload` / `GET /api/expenses/export`
//! - `GET /api/dashboard`

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::{dashboard_routes, expense_routes, setup_routes};
