//! SignupHandler - registers a new account and issues its first credential.

use std::sync::Arc;

use crate::domain::auth::TokenService;
use crate::domain::user::{hash_password, validate_password, User, UserError};
use crate::ports::UserRepository;

#[derive(Debug, Clone)]
pub struct SignupCommand {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct SignupResult {
    pub user: User,
    pub token: String,
}

pub struct SignupHandler {
    users: Arc<dyn UserRepository>,
    tokens: Arc<TokenService>,
}

impl SignupHandler {
    pub fn new(users: Arc<dyn UserRepository>, tokens: Arc<TokenService>) -> Self {
        Self { users, tokens }
    }

    pub async fn handle(&self, cmd: SignupCommand) -> Result<SignupResult, UserError> {
        validate_password(&cmd.password)?;

        let user = User::new(cmd.email, hash_password(&cmd.password)?);

        // Uniqueness is enforced by the store; a duplicate email surfaces
        // as Conflict from this call rather than a pre-check race.
        self.users.create(&user).await?;

        let token = self
            .tokens
            .issue(user.id, &user.email)
            .map_err(|e| UserError::storage(format!("failed to issue token: {}", e)))?;

        tracing::info!(user_id = %user.id, "user registered");

        Ok(SignupResult { user, token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::MockUserRepository;
    use secrecy::SecretString;

    fn tokens() -> Arc<TokenService> {
        Arc::new(TokenService::new(&SecretString::new(
            "test-secret".to_string(),
        )))
    }

    #[tokio::test]
    async fn signup_creates_pending_user_and_token() {
        let users = Arc::new(MockUserRepository::new());
        let handler = SignupHandler::new(users.clone(), tokens());

        let result = handler
            .handle(SignupCommand {
                email: "a@x.com".to_string(),
                password: "longenough".to_string(),
            })
            .await
            .unwrap();

        assert!(!result.user.has_active_subscription());
        assert!(!result.token.is_empty());
        assert_eq!(users.all().len(), 1);
        // Stored hash must never be the plaintext.
        assert_ne!(users.all()[0].password_hash, "longenough");
    }

    #[tokio::test]
    async fn duplicate_email_is_conflict() {
        let users = Arc::new(MockUserRepository::new());
        let handler = SignupHandler::new(users.clone(), tokens());

        let cmd = SignupCommand {
            email: "a@x.com".to_string(),
            password: "longenough".to_string(),
        };
        handler.handle(cmd.clone()).await.unwrap();
        let err = handler.handle(cmd).await.unwrap_err();

        assert!(matches!(err, UserError::Conflict));
        assert_eq!(users.all().len(), 1);
    }

    #[tokio::test]
    async fn short_password_is_rejected_before_storage() {
        let users = Arc::new(MockUserRepository::new());
        let handler = SignupHandler::new(users.clone(), tokens());

        let err = handler
            .handle(SignupCommand {
                email: "a@x.com".to_string(),
                password: "short".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, UserError::WeakPassword { .. }));
        assert!(users.all().is_empty());
    }
}
