//! PostgreSQL stores for setup, expenses and advisor history.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::finance::{ChatExchange, Expense, Recommendation, UserSetup};
use crate::domain::foundation::{ExpenseId, Timestamp, UserId};
use crate::ports::{AdvisorRepository, ExpenseRepository, FinanceError, SetupRepository};

fn storage_err(context: &str, e: sqlx::Error) -> FinanceError {
    FinanceError::Storage(format!("{}: {}", context, e))
}

pub struct PostgresSetupRepository {
    pool: PgPool,
}

impl PostgresSetupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SetupRow {
    bank_accounts: Vec<String>,
    credit_cards: Vec<String>,
    cash_balance: f64,
    savings_balance: f64,
}

impl From<SetupRow> for UserSetup {
    fn from(row: SetupRow) -> Self {
        UserSetup {
            bank_accounts: row.bank_accounts,
            credit_cards: row.credit_cards,
            cash_balance: row.cash_balance,
            savings_balance: row.savings_balance,
        }
    }
}

#[async_trait]
impl SetupRepository for PostgresSetupRepository {
    async fn upsert(&self, user_id: UserId, setup: &UserSetup) -> Result<(), FinanceError> {
        sqlx::query(
            r#"
            INSERT INTO user_setups (user_id, bank_accounts, credit_cards, cash_balance, savings_balance, updated_at)
            VALUES ($1, $2, $3, $4, $5, NOW())
            ON CONFLICT (user_id) DO UPDATE SET
                bank_accounts = EXCLUDED.bank_accounts,
                credit_cards = EXCLUDED.credit_cards,
                cash_balance = EXCLUDED.cash_balance,
                savings_balance = EXCLUDED.savings_balance,
                updated_at = NOW()
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(&setup.bank_accounts)
        .bind(&setup.credit_cards)
        .bind(setup.cash_balance)
        .bind(setup.savings_balance)
        .execute(&self.pool)
        .await
        .map_err(|e| storage_err("failed to upsert setup", e))?;

        Ok(())
    }

    async fn find(&self, user_id: UserId) -> Result<Option<UserSetup>, FinanceError> {
        let row: Option<SetupRow> = sqlx::query_as(
            r#"
            SELECT bank_accounts, credit_cards, cash_balance, savings_balance
            FROM user_setups
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| storage_err("failed to find setup", e))?;

        Ok(row.map(UserSetup::from))
    }
}

pub struct PostgresExpenseRepository {
    pool: PgPool,
}

impl PostgresExpenseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ExpenseRow {
    id: Uuid,
    user_id: Uuid,
    date: String,
    category: String,
    amount: f64,
    payment_method: String,
    notes: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<ExpenseRow> for Expense {
    fn from(row: ExpenseRow) -> Self {
        Expense {
            id: ExpenseId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            date: row.date,
            category: row.category,
            amount: row.amount,
            payment_method: row.payment_method,
            notes: row.notes,
            created_at: Timestamp::from_datetime(row.created_at),
        }
    }
}

#[async_trait]
impl ExpenseRepository for PostgresExpenseRepository {
    async fn insert(&self, expense: &Expense) -> Result<(), FinanceError> {
        sqlx::query(
            r#"
            INSERT INTO expenses (id, user_id, date, category, amount, payment_method, notes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(expense.id.as_uuid())
        .bind(expense.user_id.as_uuid())
        .bind(&expense.date)
        .bind(&expense.category)
        .bind(expense.amount)
        .bind(&expense.payment_method)
        .bind(&expense.notes)
        .bind(expense.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| storage_err("failed to insert expense", e))?;

        Ok(())
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
        limit: i64,
    ) -> Result<Vec<Expense>, FinanceError> {
        let rows: Vec<ExpenseRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, date, category, amount, payment_method, notes, created_at
            FROM expenses
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| storage_err("failed to list expenses", e))?;

        Ok(rows.into_iter().map(Expense::from).collect())
    }
}

pub struct PostgresAdvisorRepository {
    pool: PgPool,
}

impl PostgresAdvisorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct RecommendationRow {
    user_id: Uuid,
    recommendations: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct ExchangeRow {
    user_id: Uuid,
    message: String,
    response: String,
    created_at: DateTime<Utc>,
}

#[async_trait]
impl AdvisorRepository for PostgresAdvisorRepository {
    async fn save_recommendation(
        &self,
        recommendation: &Recommendation,
    ) -> Result<(), FinanceError> {
        sqlx::query(
            r#"
            INSERT INTO recommendations (user_id, recommendations, created_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(recommendation.user_id.as_uuid())
        .bind(&recommendation.recommendations)
        .bind(recommendation.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| storage_err("failed to save recommendation", e))?;

        Ok(())
    }

    async fn recent_recommendations(
        &self,
        user_id: UserId,
        limit: i64,
    ) -> Result<Vec<Recommendation>, FinanceError> {
        let rows: Vec<RecommendationRow> = sqlx::query_as(
            r#"
            SELECT user_id, recommendations, created_at
            FROM recommendations
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| storage_err("failed to list recommendations", e))?;

        Ok(rows
            .into_iter()
            .map(|row| Recommendation {
                user_id: UserId::from_uuid(row.user_id),
                recommendations: row.recommendations,
                created_at: Timestamp::from_datetime(row.created_at),
            })
            .collect())
    }

    async fn save_exchange(&self, exchange: &ChatExchange) -> Result<(), FinanceError> {
        sqlx::query(
            r#"
            INSERT INTO chat_messages (user_id, message, response, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(exchange.user_id.as_uuid())
        .bind(&exchange.message)
        .bind(&exchange.response)
        .bind(exchange.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| storage_err("failed to save chat exchange", e))?;

        Ok(())
    }

    async fn recent_exchanges(
        &self,
        user_id: UserId,
        limit: i64,
    ) -> Result<Vec<ChatExchange>, FinanceError> {
        let rows: Vec<ExchangeRow> = sqlx::query_as(
            r#"
            SELECT user_id, message, response, created_at
            FROM chat_messages
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| storage_err("failed to list chat exchanges", e))?;

        Ok(rows
            .into_iter()
            .map(|row| ChatExchange {
                user_id: UserId::from_uuid(row.user_id),
                message: row.message,
                response: row.response,
                created_at: Timestamp::from_datetime(row.created_at),
            })
            .collect())
    }
}
