//! LoginHandler - verifies credentials and issues a bearer token.

use std::sync::Arc;

use crate::domain::auth::TokenService;
use crate::domain::user::{verify_password, User, UserError};
use crate::ports::UserRepository;

#[derive(Debug, Clone)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct LoginResult {
    pub user: User,
    pub token: String,
}

pub struct LoginHandler {
    users: Arc<dyn UserRepository>,
    tokens: Arc<TokenService>,
}

impl LoginHandler {
    pub fn new(users: Arc<dyn UserRepository>, tokens: Arc<TokenService>) -> Self {
        Self { users, tokens }
    }

    pub async fn handle(&self, cmd: LoginCommand) -> Result<LoginResult, UserError> {
        // Unknown email and wrong password collapse into one error so
        // the endpoint cannot be used to enumerate accounts.
        let user = self
            .users
            .find_by_email(&cmd.email)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        verify_password(&cmd.password, &user.password_hash)?;

        let token = self
            .tokens
            .issue(user.id, &user.email)
            .map_err(|e| UserError::storage(format!("failed to issue token: {}", e)))?;

        tracing::debug!(user_id = %user.id, "user logged in");

        Ok(LoginResult { user, token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::MockUserRepository;
    use crate::domain::user::hash_password;
    use secrecy::SecretString;

    fn tokens() -> Arc<TokenService> {
        Arc::new(TokenService::new(&SecretString::new(
            "test-secret".to_string(),
        )))
    }

    fn stored_user() -> User {
        User::new("a@x.com", hash_password("longenough").unwrap())
    }

    #[tokio::test]
    async fn valid_credentials_issue_a_token() {
        let users = Arc::new(MockUserRepository::with_user(stored_user()));
        let handler = LoginHandler::new(users, tokens());

        let result = handler
            .handle(LoginCommand {
                email: "a@x.com".to_string(),
                password: "longenough".to_string(),
            })
            .await
            .unwrap();

        assert!(!result.token.is_empty());
        assert_eq!(result.user.email, "a@x.com");
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_are_indistinguishable() {
        let users = Arc::new(MockUserRepository::with_user(stored_user()));
        let handler = LoginHandler::new(users, tokens());

        let wrong_password = handler
            .handle(LoginCommand {
                email: "a@x.com".to_string(),
                password: "not-the-password".to_string(),
            })
            .await
            .unwrap_err();
        let unknown_email = handler
            .handle(LoginCommand {
                email: "nobody@x.com".to_string(),
                password: "longenough".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }
}
