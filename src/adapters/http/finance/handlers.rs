//! HTTP handlers for setup, expenses, export and dashboard.
//!
//! Thin one-read/one-write endpoints: no application-layer commands,
//! each handler talks to its repository directly.

use std::collections::BTreeMap;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::{RequireAuth, RequireSubscription};
use crate::adapters::http::AppState;
use crate::domain::finance::{Expense, UserSetup};

use super::dto::{
    CreateExpenseRequest, DashboardResponse, ExpenseListResponse, ExpenseResponse, ExportResponse,
    SetupRequest, SetupResponse, UploadRequest, UploadResponse,
};

/// Most expenses returned by the list endpoint.
const LIST_CAP: i64 = 100;

/// Most expenses included in a CSV export.
const EXPORT_CAP: i64 = 1000;

/// Recommendations shown on the dashboard.
const DASHBOARD_RECOMMENDATIONS: i64 = 3;

/// POST /api/user/setup - the only route gated on an active
/// subscription; everything downstream assumes setup data exists only
/// for paying users.
pub async fn save_setup(
    State(state): State<AppState>,
    RequireSubscription(user): RequireSubscription,
    Json(request): Json<SetupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let setup = UserSetup::from(request);
    state.setups.upsert(user.id, &setup).await?;
    state.users.mark_setup_completed(user.id).await?;

    Ok(Json(SetupResponse {
        bank_accounts: setup.bank_accounts,
        credit_cards: setup.credit_cards,
        cash_balance: setup.cash_balance,
        savings_balance: setup.savings_balance,
        setup_completed: true,
    }))
}

/// GET /api/user/setup
pub async fn get_setup(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let setup = state.setups.find(user.id).await?.unwrap_or_default();

    Ok(Json(SetupResponse {
        bank_accounts: setup.bank_accounts,
        credit_cards: setup.credit_cards,
        cash_balance: setup.cash_balance,
        savings_balance: setup.savings_balance,
        setup_completed: user.setup_completed,
    }))
}

/// POST /api/expenses
pub async fn create_expense(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<CreateExpenseRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let expense = Expense::new(
        user.id,
        request.date,
        request.category,
        request.amount,
        request.payment_method,
        request.notes,
    );
    state.expenses.insert(&expense).await?;

    Ok((StatusCode::CREATED, Json(ExpenseResponse::from(expense))))
}

/// GET /api/expenses
pub async fn list_expenses(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let expenses = state.expenses.list_for_user(user.id, LIST_CAP).await?;

    Ok(Json(ExpenseListResponse {
        expenses: expenses.into_iter().map(ExpenseResponse::from).collect(),
    }))
}

/// POST /api/expenses/upload - statement parsing is not implemented;
/// records a zero-amount placeholder tagged with the filename.
pub async fn upload_statement(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<UploadRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let expense = Expense::statement_placeholder(user.id, &request.filename);
    state.expenses.insert(&expense).await?;

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            message: format!("Statement {} received", request.filename),
        }),
    ))
}

/// GET /api/expenses/export
pub async fn export_expenses(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let expenses = state.expenses.list_for_user(user.id, EXPORT_CAP).await?;

    let mut csv = String::from("date,category,amount,payment_method,notes\n");
    for expense in &expenses {
        csv.push_str(&format!(
            "{},{},{:.2},{},{}\n",
            csv_field(&expense.date),
            csv_field(&expense.category),
            expense.amount,
            csv_field(&expense.payment_method),
            csv_field(expense.notes.as_deref().unwrap_or("")),
        ));
    }

    Ok(Json(ExportResponse { csv_data: csv }))
}

/// GET /api/dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let setup = state.setups.find(user.id).await?.unwrap_or_default();
    let expenses = state.expenses.list_for_user(user.id, EXPORT_CAP).await?;
    let recommendations = state
        .advisor
        .recent_recommendations(user.id, DASHBOARD_RECOMMENDATIONS)
        .await?;

    // Expense dates are YYYY-MM-DD strings; the current month is a
    // prefix match.
    let month_prefix = chrono::Utc::now().format("%Y-%m").to_string();
    let mut monthly_total = 0.0;
    let mut category_breakdown: BTreeMap<String, f64> = BTreeMap::new();
    for expense in expenses.iter().filter(|e| e.date.starts_with(&month_prefix)) {
        monthly_total += expense.amount;
        *category_breakdown.entry(expense.category.clone()).or_insert(0.0) += expense.amount;
    }

    Ok(Json(DashboardResponse {
        monthly_total,
        category_breakdown,
        cash_balance: setup.cash_balance,
        savings_balance: setup.savings_balance,
        recent_recommendations: recommendations
            .into_iter()
            .map(|r| r.recommendations)
            .collect(),
    }))
}

/// Quotes a CSV field when it contains a delimiter, quote or newline.
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_fields_with_commas_are_quoted() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
