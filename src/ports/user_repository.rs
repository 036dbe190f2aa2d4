//! User repository port - the credential store.

use async_trait::async_trait;

use crate::domain::foundation::UserId;
use crate::domain::user::{User, UserError};

/// Persistent store for user accounts; the sole source of truth for
/// authorization decisions.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persists a new account.
    ///
    /// Fails with `UserError::Conflict` when the email is already
    /// registered (case-sensitive exact match).
    async fn create(&self, user: &User) -> Result<(), UserError>;

    /// Looks up an account by its canonical email key.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;

    /// Looks up an account by id.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserError>;

    /// Flips the subscription to active.
    ///
    /// Idempotent: activating an already-active user is a success, not an
    /// error. There is no reverse transition.
    async fn activate_subscription(&self, id: UserId) -> Result<(), UserError>;

    /// Marks the financial setup as completed.
    async fn mark_setup_completed(&self, id: UserId) -> Result<(), UserError>;
}
