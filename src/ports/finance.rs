//! Stores backing the financial profile and advisor features.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::finance::{ChatExchange, Expense, Recommendation, UserSetup};
use crate::domain::foundation::UserId;

#[derive(Debug, Error)]
pub enum FinanceError {
    #[error("storage error: {0}")]
    Storage(String),
}

/// Store for the one-time financial setup snapshot.
#[async_trait]
pub trait SetupRepository: Send + Sync {
    /// Inserts or replaces the setup for a user.
    async fn upsert(&self, user_id: UserId, setup: &UserSetup) -> Result<(), FinanceError>;

    async fn find(&self, user_id: UserId) -> Result<Option<UserSetup>, FinanceError>;
}

/// Store for manually entered expenses.
#[async_trait]
pub trait ExpenseRepository: Send + Sync {
    async fn insert(&self, expense: &Expense) -> Result<(), FinanceError>;

    /// Expenses for a user, newest first, capped at `limit`.
    async fn list_for_user(&self, user_id: UserId, limit: i64)
        -> Result<Vec<Expense>, FinanceError>;
}

/// Store for advisor output: recommendations and chat history.
#[async_trait]
pub trait AdvisorRepository: Send + Sync {
    async fn save_recommendation(
        &self,
        recommendation: &Recommendation,
    ) -> Result<(), FinanceError>;

    /// Most recent recommendations, newest first.
    async fn recent_recommendations(
        &self,
        user_id: UserId,
        limit: i64,
    ) -> Result<Vec<Recommendation>, FinanceError>;

    async fn save_exchange(&self, exchange: &ChatExchange) -> Result<(), FinanceError>;

    /// Most recent exchanges, newest first.
    async fn recent_exchanges(
        &self,
        user_id: UserId,
        limit: i64,
    ) -> Result<Vec<ChatExchange>, FinanceError>;
}
