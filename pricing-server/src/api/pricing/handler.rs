//! Calculator API Handlers

use axum::Json;
use serde::Deserialize;
use shared::models::{PriceDriver, PricingInput, PricingResult};

use crate::pricing::PricingCalculator;
use crate::utils::AppResult;

/// POST /api/pricing/suggest - suggested price from costs, rates and desired margin
pub async fn suggest(Json(input): Json<PricingInput>) -> AppResult<Json<PricingResult>> {
    input.validate()?;
    Ok(Json(PricingCalculator::suggest(&input)))
}

#[derive(Debug, Deserialize)]
pub struct RecalculateRequest {
    #[serde(default)]
    pub input: PricingInput,
    pub driver: PriceDriver,
}

/// POST /api/pricing/recalculate - derive the other two of markup / margin / price
pub async fn recalculate(
    Json(req): Json<RecalculateRequest>,
) -> AppResult<Json<PricingResult>> {
    req.input.validate()?;
    req.driver.validate()?;
    Ok(Json(PricingCalculator::recalculate(&req.input, req.driver)))
}
