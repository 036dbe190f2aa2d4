//! Foundation module - Shared domain primitives.
//!
//! Contains the identifier newtypes and timestamp value object that form
//! the vocabulary of the Finsight domain.

mod ids;
mod timestamp;

pub use ids::{ExpenseId, TransactionId, UserId};
pub use timestamp::Timestamp;
