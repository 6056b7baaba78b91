//! Revenue API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{Revenue, RevenueCreate};

use crate::core::ServerState;
use crate::utils::AppResult;

/// GET /api/companies/{id}/revenues - list revenue records of a company
pub async fn list(
    State(state): State<ServerState>,
    Path(company_id): Path<i64>,
) -> AppResult<Json<Vec<Revenue>>> {
    let rows = state.pricing.list_revenues(company_id).await?;
    Ok(Json(rows))
}

/// POST /api/companies/{id}/revenues - add a revenue record
pub async fn create(
    State(state): State<ServerState>,
    Path(company_id): Path<i64>,
    Json(payload): Json<RevenueCreate>,
) -> AppResult<Json<Revenue>> {
    let row = state.pricing.create_revenue(company_id, payload).await?;
    Ok(Json(row))
}

/// DELETE /api/companies/{id}/revenues/{revenue_id} - remove a revenue record
pub async fn delete(
    State(state): State<ServerState>,
    Path((company_id, revenue_id)): Path<(i64, i64)>,
) -> AppResult<Json<bool>> {
    state.pricing.delete_revenue(company_id, revenue_id).await?;
    Ok(Json(true))
}
