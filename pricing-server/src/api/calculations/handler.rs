//! Saved Calculation API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{Calculation, CalculationCreate};

use crate::core::ServerState;
use crate::utils::AppResult;

/// GET /api/companies/{id}/calculations
pub async fn list(
    State(state): State<ServerState>,
    Path(company_id): Path<i64>,
) -> AppResult<Json<Vec<Calculation>>> {
    let calculations = state.pricing.list_calculations(company_id).await?;
    Ok(Json(calculations))
}

/// POST /api/companies/{id}/calculations - run the calculator and keep the result
pub async fn create(
    State(state): State<ServerState>,
    Path(company_id): Path<i64>,
    Json(payload): Json<CalculationCreate>,
) -> AppResult<Json<Calculation>> {
    let calculation = state.pricing.save_calculation(company_id, payload).await?;
    Ok(Json(calculation))
}

/// GET /api/companies/{id}/calculations/{calc_id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path((company_id, calc_id)): Path<(i64, i64)>,
) -> AppResult<Json<Calculation>> {
    let calculation = state.pricing.get_calculation(company_id, calc_id).await?;
    Ok(Json(calculation))
}

/// DELETE /api/companies/{id}/calculations/{calc_id}
pub async fn delete(
    State(state): State<ServerState>,
    Path((company_id, calc_id)): Path<(i64, i64)>,
) -> AppResult<Json<bool>> {
    state.pricing.delete_calculation(company_id, calc_id).await?;
    Ok(Json(true))
}
