//! JSON request/response types for setup, expenses and dashboard.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::finance::{Expense, UserSetup};

#[derive(Debug, Clone, Deserialize)]
pub struct SetupRequest {
    #[serde(default)]
    pub bank_accounts: Vec<String>,
    #[serde(default)]
    pub credit_cards: Vec<String>,
    #[serde(default)]
    pub cash_balance: f64,
    #[serde(default)]
    pub savings_balance: f64,
}

impl From<SetupRequest> for UserSetup {
    fn from(request: SetupRequest) -> Self {
        UserSetup {
            bank_accounts: request.bank_accounts,
            credit_cards: request.credit_cards,
            cash_balance: request.cash_balance,
            savings_balance: request.savings_balance,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SetupResponse {
    pub bank_accounts: Vec<String>,
    pub credit_cards: Vec<String>,
    pub cash_balance: f64,
    pub savings_balance: f64,
    pub setup_completed: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateExpenseRequest {
    /// YYYY-MM-DD as entered in the ledger UI.
    pub date: String,
    pub category: String,
    pub amount: f64,
    pub payment_method: String,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExpenseResponse {
    pub id: String,
    pub date: String,
    pub category: String,
    pub amount: f64,
    pub payment_method: String,
    pub notes: Option<String>,
    pub created_at: String,
}

impl From<Expense> for ExpenseResponse {
    fn from(expense: Expense) -> Self {
        Self {
            id: expense.id.to_string(),
            date: expense.date,
            category: expense.category,
            amount: expense.amount,
            payment_method: expense.payment_method,
            notes: expense.notes,
            created_at: expense.created_at.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExpenseListResponse {
    pub expenses: Vec<ExpenseResponse>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadRequest {
    pub filename: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UploadResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportResponse {
    pub csv_data: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardResponse {
    pub monthly_total: f64,
    /// Spend per category, current calendar month. BTreeMap keeps the
    /// JSON key order stable.
    pub category_breakdown: BTreeMap<String, f64>,
    pub cash_balance: f64,
    pub savings_balance: f64,
    pub recent_recommendations: Vec<String>,
}
