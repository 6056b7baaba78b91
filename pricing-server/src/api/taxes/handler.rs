//! Tax API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{Tax, TaxCreate};

use crate::core::ServerState;
use crate::utils::AppResult;

/// GET /api/companies/{id}/taxes - list tax records of a company
pub async fn list(
    State(state): State<ServerState>,
    Path(company_id): Path<i64>,
) -> AppResult<Json<Vec<Tax>>> {
    let rows = state.pricing.list_taxes(company_id).await?;
    Ok(Json(rows))
}

/// POST /api/companies/{id}/taxes - add a tax record
pub async fn create(
    State(state): State<ServerState>,
    Path(company_id): Path<i64>,
    Json(payload): Json<TaxCreate>,
) -> AppResult<Json<Tax>> {
    let row = state.pricing.create_tax(company_id, payload).await?;
    Ok(Json(row))
}

/// DELETE /api/companies/{id}/taxes/{tax_id} - remove a tax record
pub async fn delete(
    State(state): State<ServerState>,
    Path((company_id, tax_id)): Path<(i64, i64)>,
) -> AppResult<Json<bool>> {
    state.pricing.delete_tax(company_id, tax_id).await?;
    Ok(Json(true))
}
