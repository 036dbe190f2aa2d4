//! Domain layer - Core business logic.
//!
//! - `foundation` - shared primitives (ids, timestamps)
//! - `user` - user aggregate, password hashing, subscription status
//! - `auth` - stateless bearer-token service
//! - `payment` - checkout transactions, price table, reconciliation
//! - `finance` - expense, setup and advisor records (thin collaborators)

pub mod auth;
pub mod finance;
pub mod foundation;
pub mod payment;
pub mod user;
