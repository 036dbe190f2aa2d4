//! HTTP adapter for the LLM advisor.
//!
//! - `POST /api/chat` / `GET /api/chat/history`
//! - `POST /api/recommendations`

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::{chat_routes, recommendation_routes};
