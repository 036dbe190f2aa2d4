//! Adapters - implementations of the port interfaces.
//!
//! - `postgres` - persistence over sqlx
//! - `stripe` - hosted checkout provider
//! - `ai` - chat-completion provider
//! - `http` - the REST surface

pub mod ai;
pub mod http;
pub mod postgres;
pub mod stripe;
