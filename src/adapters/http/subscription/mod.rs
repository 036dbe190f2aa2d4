//! HTTP adapter for checkout and payment reconciliation.
//!
//! - `POST /api/subscription/checkout` - start hosted checkout
//! - `GET /api/subscription/status/:session_id` - pull-path reconciliation
//! - `POST /api/webhook/stripe` - push-path reconciliation

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::{subscription_routes, webhook_routes};
