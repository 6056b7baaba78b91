//! Expense API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{Expense, ExpenseCreate};

use crate::core::ServerState;
use crate::utils::AppResult;

/// GET /api/companies/{id}/expenses - list expense records of a company
pub async fn list(
    State(state): State<ServerState>,
    Path(company_id): Path<i64>,
) -> AppResult<Json<Vec<Expense>>> {
    let rows = state.pricing.list_expenses(company_id).await?;
    Ok(Json(rows))
}

/// POST /api/companies/{id}/expenses - add a expense record
pub async fn create(
    State(state): State<ServerState>,
    Path(company_id): Path<i64>,
    Json(payload): Json<ExpenseCreate>,
) -> AppResult<Json<Expense>> {
    let row = state.pricing.create_expense(company_id, payload).await?;
    Ok(Json(row))
}

/// DELETE /api/companies/{id}/expenses/{expense_id} - remove a expense record
pub async fn delete(
    State(state): State<ServerState>,
    Path((company_id, expense_id)): Path<(i64, i64)>,
) -> AppResult<Json<bool>> {
    state.pricing.delete_expense(company_id, expense_id).await?;
    Ok(Json(true))
}
