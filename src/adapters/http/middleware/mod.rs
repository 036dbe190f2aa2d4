//! Request middleware.

pub mod auth;

pub use auth::{auth_middleware, AuthGate, CurrentUser, RequireAuth, RequireSubscription};
