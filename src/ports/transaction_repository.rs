//! Payment transaction repository port.

use async_trait::async_trait;

use crate::domain::payment::{Observation, PaymentError, PaymentTransaction, Transition};

/// A recorded observation: the computed transition plus the transaction
/// as persisted after it.
#[derive(Debug, Clone)]
pub struct ReconciledTransaction {
    pub transition: Transition,
    pub transaction: PaymentTransaction,
}

/// Persistent store for payment transactions.
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Persists a freshly initiated transaction.
    ///
    /// At most one transaction may exist per `session_id`.
    async fn insert(&self, transaction: &PaymentTransaction) -> Result<(), PaymentError>;

    /// Looks up a transaction by its provider session id.
    async fn find_by_session_id(
        &self,
        session_id: &str,
    ) -> Result<Option<PaymentTransaction>, PaymentError>;

    /// Applies an observed provider state to the transaction for
    /// `session_id` through the `reconcile` transition.
    ///
    /// Implementations must serialize the read-compute-write per session
    /// (row lock or equivalent): two concurrent "first paid" observations
    /// must not both see a non-paid prior. Returns `None` when no
    /// transaction exists for the session.
    async fn record_observation(
        &self,
        session_id: &str,
        observed: &Observation,
    ) -> Result<Option<ReconciledTransaction>, PaymentError>;
}
