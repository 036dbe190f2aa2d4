//! User domain - accounts, passwords, subscription status.

mod aggregate;
mod errors;
mod password;
mod status;

pub use aggregate::User;
pub use errors::UserError;
pub use password::{hash_password, validate_password, verify_password, MIN_PASSWORD_LENGTH};
pub use status::SubscriptionStatus;
