//! HTTP adapter for authentication.
//!
//! - `POST /api/auth/signup` - register, returns a bearer token
//! - `POST /api/auth/login` - authenticate, returns a bearer token

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::auth_routes;
