//! Product API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{Product, ProductCreate, ProductUpdate};

use crate::core::ServerState;
use crate::utils::AppResult;

/// GET /api/companies/{id}/products - list products
pub async fn list(
    State(state): State<ServerState>,
    Path(company_id): Path<i64>,
) -> AppResult<Json<Vec<Product>>> {
    let products = state.pricing.list_products(company_id).await?;
    Ok(Json(products))
}

/// GET /api/companies/{id}/products/{product_id} - get product
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path((company_id, product_id)): Path<(i64, i64)>,
) -> AppResult<Json<Product>> {
    let product = state.pricing.get_product(company_id, product_id).await?;
    Ok(Json(product))
}

/// POST /api/companies/{id}/products - create and price a product
pub async fn create(
    State(state): State<ServerState>,
    Path(company_id): Path<i64>,
    Json(payload): Json<ProductCreate>,
) -> AppResult<Json<Product>> {
    let product = state.pricing.save_product(company_id, payload).await?;
    Ok(Json(product))
}

/// PUT /api/companies/{id}/products/{product_id} - update and reprice
pub async fn update(
    State(state): State<ServerState>,
    Path((company_id, product_id)): Path<(i64, i64)>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<Product>> {
    let product = state
        .pricing
        .update_product(company_id, product_id, payload)
        .await?;
    Ok(Json(product))
}

/// DELETE /api/companies/{id}/products/{product_id}
pub async fn delete(
    State(state): State<ServerState>,
    Path((company_id, product_id)): Path<(i64, i64)>,
) -> AppResult<Json<bool>> {
    state.pricing.delete_product(company_id, product_id).await?;
    Ok(Json(true))
}
