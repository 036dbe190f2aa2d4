//! Finance records - the thin collaborators behind the subscription gate.
//!
//! These are one-read/one-write features; the only contract they have
//! with the core is "is the caller authenticated and subscribed".

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ExpenseId, Timestamp, UserId};

/// A single recorded expense.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub user_id: UserId,
    /// Client-supplied date string (YYYY-MM-DD), as in the ledger UI.
    pub date: String,
    pub category: String,
    pub amount: f64,
    pub payment_method: String,
    pub notes: Option<String>,
    pub created_at: Timestamp,
}

impl Expense {
    pub fn new(
        user_id: UserId,
        date: impl Into<String>,
        category: impl Into<String>,
        amount: f64,
        payment_method: impl Into<String>,
        notes: Option<String>,
    ) -> Self {
        Self {
            id: ExpenseId::new(),
            user_id,
            date: date.into(),
            category: category.into(),
            amount,
            payment_method: payment_method.into(),
            notes,
            created_at: Timestamp::now(),
        }
    }

    /// Placeholder expense recorded for an uploaded statement until
    /// statement parsing lands.
    pub fn statement_placeholder(user_id: UserId, filename: &str) -> Self {
        Self::new(
            user_id,
            Timestamp::now().as_datetime().format("%Y-%m-%d").to_string(),
            "Statement Upload",
            0.0,
            "Credit Card",
            Some(format!("Uploaded statement: {}", filename)),
        )
    }
}

/// A user's financial profile captured at setup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserSetup {
    pub bank_accounts: Vec<String>,
    pub credit_cards: Vec<String>,
    pub cash_balance: f64,
    pub savings_balance: f64,
}

/// A persisted LLM recommendation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub user_id: UserId,
    pub recommendations: String,
    pub created_at: Timestamp,
}

/// One chat exchange with the advisor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatExchange {
    pub user_id: UserId,
    pub message: String,
    pub response: String,
    pub created_at: Timestamp,
}
