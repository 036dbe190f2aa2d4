//! Authentication domain - bearer-token issuance and validation.

mod errors;
mod token;

pub use errors::AuthError;
pub use token::{Claims, TokenService};
