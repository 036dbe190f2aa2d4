//! Shared mock adapters for handler tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::finance::{ChatExchange, Expense, Recommendation, UserSetup};
use crate::domain::foundation::UserId;
use crate::domain::payment::{
    reconcile, Observation, PaymentError, PaymentTransaction,
};
use crate::domain::user::{SubscriptionStatus, User, UserError};
use crate::ports::{
    AdvisorRepository, CheckoutProvider, CreateSessionRequest, ExpenseRepository, FinanceError,
    HostedSession, ReconciledTransaction, SetupRepository, TransactionRepository, UserRepository,
};

pub struct MockUserRepository {
    users: Mutex<Vec<User>>,
    activations: Mutex<usize>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
            activations: Mutex::new(0),
        }
    }

    pub fn with_user(user: User) -> Self {
        Self {
            users: Mutex::new(vec![user]),
            activations: Mutex::new(0),
        }
    }

    pub fn all(&self) -> Vec<User> {
        self.users.lock().unwrap().clone()
    }

    /// How many times `activate_subscription` was called.
    pub fn activation_count(&self) -> usize {
        *self.activations.lock().unwrap()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn create(&self, user: &User) -> Result<(), UserError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(UserError::Conflict);
        }
        users.push(user.clone());
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }

    async fn activate_subscription(&self, id: UserId) -> Result<(), UserError> {
        *self.activations.lock().unwrap() += 1;
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(UserError::NotFound(id))?;
        user.subscription_status = SubscriptionStatus::Active;
        Ok(())
    }

    async fn mark_setup_completed(&self, id: UserId) -> Result<(), UserError> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(UserError::NotFound(id))?;
        user.setup_completed = true;
        Ok(())
    }
}

pub struct MockTransactionRepository {
    transactions: Mutex<Vec<PaymentTransaction>>,
}

impl MockTransactionRepository {
    pub fn new() -> Self {
        Self {
            transactions: Mutex::new(Vec::new()),
        }
    }

    pub fn with_transaction(transaction: PaymentTransaction) -> Self {
        Self {
            transactions: Mutex::new(vec![transaction]),
        }
    }

    pub fn all(&self) -> Vec<PaymentTransaction> {
        self.transactions.lock().unwrap().clone()
    }
}

#[async_trait]
impl TransactionRepository for MockTransactionRepository {
    async fn insert(&self, transaction: &PaymentTransaction) -> Result<(), PaymentError> {
        self.transactions.lock().unwrap().push(transaction.clone());
        Ok(())
    }

    async fn find_by_session_id(
        &self,
        session_id: &str,
    ) -> Result<Option<PaymentTransaction>, PaymentError> {
        Ok(self
            .transactions
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.session_id == session_id)
            .cloned())
    }

    async fn record_observation(
        &self,
        session_id: &str,
        observed: &Observation,
    ) -> Result<Option<ReconciledTransaction>, PaymentError> {
        // The mutex plays the role of the database row lock.
        let mut transactions = self.transactions.lock().unwrap();
        let Some(transaction) = transactions
            .iter_mut()
            .find(|t| t.session_id == session_id)
        else {
            return Ok(None);
        };

        let transition = reconcile(transaction.payment_status, observed);
        transaction.payment_status = transition.payment_status;
        transaction.status = transition.status;

        Ok(Some(ReconciledTransaction {
            transition,
            transaction: transaction.clone(),
        }))
    }
}

pub struct MockCheckoutProvider {
    session_id: String,
    url: String,
    status: Mutex<Observation>,
    last_request: Mutex<Option<CreateSessionRequest>>,
}

impl MockCheckoutProvider {
    pub fn new(session_id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            url: url.into(),
            status: Mutex::new(Observation {
                payment_status: crate::domain::payment::PaymentStatus::Pending,
                status: crate::domain::payment::CheckoutStatus::Pending,
                amount_total: None,
                currency: None,
            }),
            last_request: Mutex::new(None),
        }
    }

    pub fn with_status(self, observed: Observation) -> Self {
        *self.status.lock().unwrap() = observed;
        self
    }

    pub fn last_request(&self) -> Option<CreateSessionRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl CheckoutProvider for MockCheckoutProvider {
    async fn create_session(
        &self,
        request: CreateSessionRequest,
    ) -> Result<HostedSession, PaymentError> {
        *self.last_request.lock().unwrap() = Some(request);
        Ok(HostedSession {
            session_id: self.session_id.clone(),
            url: self.url.clone(),
        })
    }

    async fn fetch_status(&self, session_id: &str) -> Result<Observation, PaymentError> {
        if session_id != self.session_id {
            return Err(PaymentError::SessionNotFound(session_id.to_string()));
        }
        Ok(self.status.lock().unwrap().clone())
    }
}

/// In-memory stand-ins for the finance stores, for router-level tests.
#[derive(Default)]
pub struct MockFinanceStores {
    setups: Mutex<Vec<(UserId, UserSetup)>>,
    expenses: Mutex<Vec<Expense>>,
    recommendations: Mutex<Vec<Recommendation>>,
    exchanges: Mutex<Vec<ChatExchange>>,
}

impl MockFinanceStores {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SetupRepository for MockFinanceStores {
    async fn upsert(&self, user_id: UserId, setup: &UserSetup) -> Result<(), FinanceError> {
        let mut setups = self.setups.lock().unwrap();
        setups.retain(|(id, _)| *id != user_id);
        setups.push((user_id, setup.clone()));
        Ok(())
    }

    async fn find(&self, user_id: UserId) -> Result<Option<UserSetup>, FinanceError> {
        Ok(self
            .setups
            .lock()
            .unwrap()
            .iter()
            .find(|(id, _)| *id == user_id)
            .map(|(_, setup)| setup.clone()))
    }
}

#[async_trait]
impl ExpenseRepository for MockFinanceStores {
    async fn insert(&self, expense: &Expense) -> Result<(), FinanceError> {
        self.expenses.lock().unwrap().push(expense.clone());
        Ok(())
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
        limit: i64,
    ) -> Result<Vec<Expense>, FinanceError> {
        Ok(self
            .expenses
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.user_id == user_id)
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl AdvisorRepository for MockFinanceStores {
    async fn save_recommendation(
        &self,
        recommendation: &Recommendation,
    ) -> Result<(), FinanceError> {
        self.recommendations
            .lock()
            .unwrap()
            .push(recommendation.clone());
        Ok(())
    }

    async fn recent_recommendations(
        &self,
        user_id: UserId,
        limit: i64,
    ) -> Result<Vec<Recommendation>, FinanceError> {
        Ok(self
            .recommendations
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.user_id == user_id)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn save_exchange(&self, exchange: &ChatExchange) -> Result<(), FinanceError> {
        self.exchanges.lock().unwrap().push(exchange.clone());
        Ok(())
    }

    async fn recent_exchanges(
        &self,
        user_id: UserId,
        limit: i64,
    ) -> Result<Vec<ChatExchange>, FinanceError> {
        Ok(self
            .exchanges
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.user_id == user_id)
            .take(limit as usize)
            .cloned()
            .collect())
    }
}
