//! Company API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{Company, CompanyCreate, CompanyRates, PricingInput, PricingResult};

use crate::core::ServerState;
use crate::utils::AppResult;

/// GET /api/companies - list companies
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Company>>> {
    let companies = state.pricing.list_companies().await?;
    Ok(Json(companies))
}

/// POST /api/companies - create company
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CompanyCreate>,
) -> AppResult<Json<Company>> {
    let company = state.pricing.create_company(payload).await?;
    Ok(Json(company))
}

/// GET /api/companies/{id} - get company
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Company>> {
    let company = state.pricing.get_company(id).await?;
    Ok(Json(company))
}

/// GET /api/companies/{id}/rates - expense and tax rates aggregated from the company records
pub async fn rates(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<CompanyRates>> {
    let rates = state.pricing.company_rates(id).await?;
    Ok(Json(rates))
}

/// POST /api/companies/{id}/quote - calculator with the company's rates
pub async fn quote(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(input): Json<PricingInput>,
) -> AppResult<Json<PricingResult>> {
    let result = state.pricing.quote(id, input).await?;
    Ok(Json(result))
}
