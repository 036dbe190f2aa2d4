//! PostgreSQL implementation of UserRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::user::{SubscriptionStatus, User, UserError};
use crate::ports::UserRepository;

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    password_hash: String,
    subscription_status: String,
    setup_completed: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = UserError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let subscription_status = SubscriptionStatus::parse(&row.subscription_status)
            .ok_or_else(|| {
                UserError::storage(format!(
                    "invalid subscription_status value: {}",
                    row.subscription_status
                ))
            })?;

        Ok(User {
            id: UserId::from_uuid(row.id),
            email: row.email,
            password_hash: row.password_hash,
            subscription_status,
            setup_completed: row.setup_completed,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

const SELECT_USER: &str = r#"
    SELECT id, email, password_hash, subscription_status, setup_completed, created_at
    FROM users
"#;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: &User) -> Result<(), UserError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, email, password_hash, subscription_status, setup_completed, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.subscription_status.as_str())
        .bind(user.setup_completed)
        .bind(user.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("users_email_key") {
                    return UserError::Conflict;
                }
            }
            UserError::storage(format!("failed to create user: {}", e))
        })?;

        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("{} WHERE email = $1", SELECT_USER))
                .bind(email)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| UserError::storage(format!("failed to find user: {}", e)))?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserError> {
        let row: Option<UserRow> = sqlx::query_as(&format!("{} WHERE id = $1", SELECT_USER))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserError::storage(format!("failed to find user: {}", e)))?;

        row.map(User::try_from).transpose()
    }

    async fn activate_subscription(&self, id: UserId) -> Result<(), UserError> {
        // Unconditional write keeps the call idempotent for repeated
        // paid observations of the same session.
        let result = sqlx::query("UPDATE users SET subscription_status = $2 WHERE id = $1")
            .bind(id.as_uuid())
            .bind(SubscriptionStatus::Active.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| UserError::storage(format!("failed to activate subscription: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(id));
        }

        Ok(())
    }

    async fn mark_setup_completed(&self, id: UserId) -> Result<(), UserError> {
        let result = sqlx::query("UPDATE users SET setup_completed = TRUE WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| UserError::storage(format!("failed to mark setup completed: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(id));
        }

        Ok(())
    }
}
