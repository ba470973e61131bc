use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use serde::de::DeserializeOwned;

use crate::error::{ApiError, Operation, StoreResult};
use crate::ledger::Ledger;
use crate::models::{NewExpense, SalaryUpdate, SavingsUpdate};
use crate::server::AppState;
use crate::wire::{AckBody, CreatedBody, ExpensesBody, HealthBody, SalaryBody, SavingsBody};

/// Runs a store call off the async workers and tags any failure with `op`.
async fn with_ledger<T, F>(state: &AppState, op: Operation, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&Ledger) -> StoreResult<T> + Send + 'static,
    T: Send + 'static,
{
    let ledger = state.ledger.clone();
    tokio::task::spawn_blocking(move || f(&ledger))
        .await
        .map_err(|e| ApiError::Task {
            op,
            detail: e.to_string(),
        })?
        .map_err(|source| ApiError::Store { op, source })
}

/// Bodies are parsed by hand so a missing content type or bad JSON produces
/// the same enveloped 500 as any other failure.
fn parse_body<T: DeserializeOwned>(op: Operation, body: &Bytes) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::Body {
        op,
        detail: e.to_string(),
    })
}

pub(crate) async fn health() -> Json<HealthBody> {
    Json(HealthBody {
        status: "ok".to_string(),
        timestamp: Utc::now(),
    })
}

pub(crate) async fn list_expenses(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<ExpensesBody>, ApiError> {
    let expenses = with_ledger(&state, Operation::FetchExpenses, move |ledger| {
        ledger.list_expenses(&user_id)
    })
    .await?;
    Ok(Json(ExpensesBody {
        success: true,
        expenses,
    }))
}

pub(crate) async fn add_expense(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    body: Bytes,
) -> Result<Json<CreatedBody>, ApiError> {
    let new: NewExpense = parse_body(Operation::AddExpense, &body)?;
    let id = with_ledger(&state, Operation::AddExpense, move |ledger| {
        ledger.add_expense(&user_id, new)
    })
    .await?;
    Ok(Json(CreatedBody { success: true, id }))
}

pub(crate) async fn delete_expense(
    State(state): State<AppState>,
    Path((user_id, expense_id)): Path<(String, String)>,
) -> Result<Json<AckBody>, ApiError> {
    with_ledger(&state, Operation::DeleteExpense, move |ledger| {
        ledger.delete_expense(&user_id, &expense_id)
    })
    .await?;
    Ok(Json(AckBody::ok()))
}

pub(crate) async fn get_salary(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<SalaryBody>, ApiError> {
    let salary = with_ledger(&state, Operation::FetchSalary, move |ledger| {
        ledger.salary(&user_id)
    })
    .await?;
    Ok(Json(SalaryBody {
        success: true,
        salary,
    }))
}

pub(crate) async fn update_salary(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    body: Bytes,
) -> Result<Json<AckBody>, ApiError> {
    let update: SalaryUpdate = parse_body(Operation::UpdateSalary, &body)?;
    with_ledger(&state, Operation::UpdateSalary, move |ledger| {
        ledger.set_salary(&user_id, update)
    })
    .await?;
    Ok(Json(AckBody::ok()))
}

pub(crate) async fn get_savings(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<SavingsBody>, ApiError> {
    let savings = with_ledger(&state, Operation::FetchSavings, move |ledger| {
        ledger.savings(&user_id)
    })
    .await?;
    Ok(Json(SavingsBody {
        success: true,
        savings,
    }))
}

pub(crate) async fn update_savings(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    body: Bytes,
) -> Result<Json<AckBody>, ApiError> {
    let update: SavingsUpdate = parse_body(Operation::UpdateSavings, &body)?;
    with_ledger(&state, Operation::UpdateSavings, move |ledger| {
        ledger.update_savings(&user_id, &update)
    })
    .await?;
    Ok(Json(AckBody::ok()))
}

pub(crate) async fn not_found() -> ApiError {
    ApiError::NotFound
}
