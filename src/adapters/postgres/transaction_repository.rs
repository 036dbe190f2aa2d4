//! PostgreSQL implementation of TransactionRepository.
//!
//! `record_observation` is the serialization point of reconciliation: it
//! holds a `FOR UPDATE` row lock across the read-reconcile-write, so a
//! webhook delivery and a status poll for the same session apply their
//! transitions one at a time.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{Timestamp, TransactionId, UserId};
use crate::domain::payment::{
    reconcile, CheckoutStatus, Observation, PaymentError, PaymentStatus, PaymentTransaction,
    TransactionMetadata,
};
use crate::ports::{ReconciledTransaction, TransactionRepository};

pub struct PostgresTransactionRepository {
    pool: PgPool,
}

impl PostgresTransactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct TransactionRow {
    id: Uuid,
    user_id: Uuid,
    session_id: String,
    amount_cents: i64,
    currency: String,
    package_id: String,
    payment_status: String,
    status: String,
    customer_email: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TransactionRow> for PaymentTransaction {
    type Error = PaymentError;

    fn try_from(row: TransactionRow) -> Result<Self, Self::Error> {
        let payment_status = PaymentStatus::parse(&row.payment_status).ok_or_else(|| {
            PaymentError::storage(format!(
                "invalid payment_status value: {}",
                row.payment_status
            ))
        })?;
        let status = CheckoutStatus::parse(&row.status)
            .ok_or_else(|| PaymentError::storage(format!("invalid status value: {}", row.status)))?;

        let user_id = UserId::from_uuid(row.user_id);
        Ok(PaymentTransaction {
            id: TransactionId::from_uuid(row.id),
            user_id,
            session_id: row.session_id,
            amount_cents: row.amount_cents,
            currency: row.currency,
            package_id: row.package_id.clone(),
            payment_status,
            status,
            metadata: TransactionMetadata {
                user_id,
                package_id: row.package_id,
                email: row.customer_email,
            },
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

const SELECT_TRANSACTION: &str = r#"
    SELECT id, user_id, session_id, amount_cents, currency, package_id,
           payment_status, status, customer_email, created_at, updated_at
    FROM payment_transactions
"#;

#[async_trait]
impl TransactionRepository for PostgresTransactionRepository {
    async fn insert(&self, transaction: &PaymentTransaction) -> Result<(), PaymentError> {
        sqlx::query(
            r#"
            INSERT INTO payment_transactions (
                id, user_id, session_id, amount_cents, currency, package_id,
                payment_status, status, customer_email, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(transaction.id.as_uuid())
        .bind(transaction.user_id.as_uuid())
        .bind(&transaction.session_id)
        .bind(transaction.amount_cents)
        .bind(&transaction.currency)
        .bind(&transaction.package_id)
        .bind(transaction.payment_status.as_str())
        .bind(transaction.status.as_str())
        .bind(&transaction.metadata.email)
        .bind(transaction.created_at.as_datetime())
        .bind(transaction.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| PaymentError::storage(format!("failed to insert transaction: {}", e)))?;

        Ok(())
    }

    async fn find_by_session_id(
        &self,
        session_id: &str,
    ) -> Result<Option<PaymentTransaction>, PaymentError> {
        let row: Option<TransactionRow> =
            sqlx::query_as(&format!("{} WHERE session_id = $1", SELECT_TRANSACTION))
                .bind(session_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| PaymentError::storage(format!("failed to find transaction: {}", e)))?;

        row.map(PaymentTransaction::try_from).transpose()
    }

    async fn record_observation(
        &self,
        session_id: &str,
        observed: &Observation,
    ) -> Result<Option<ReconciledTransaction>, PaymentError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| PaymentError::storage(format!("failed to begin transaction: {}", e)))?;

        let row: Option<TransactionRow> = sqlx::query_as(&format!(
            "{} WHERE session_id = $1 FOR UPDATE",
            SELECT_TRANSACTION
        ))
        .bind(session_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| PaymentError::storage(format!("failed to lock transaction: {}", e)))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut transaction = PaymentTransaction::try_from(row)?;
        let transition = reconcile(transaction.payment_status, observed);

        let updated_at = Timestamp::now();
        sqlx::query(
            r#"
            UPDATE payment_transactions
            SET payment_status = $2, status = $3, updated_at = $4
            WHERE session_id = $1
            "#,
        )
        .bind(session_id)
        .bind(transition.payment_status.as_str())
        .bind(transition.status.as_str())
        .bind(updated_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| PaymentError::storage(format!("failed to update transaction: {}", e)))?;

        tx.commit()
            .await
            .map_err(|e| PaymentError::storage(format!("failed to commit transaction: {}", e)))?;

        transaction.payment_status = transition.payment_status;
        transaction.status = transition.status;
        transaction.updated_at = updated_at;

        Ok(Some(ReconciledTransaction {
            transition,
            transaction,
        }))
    }
}
