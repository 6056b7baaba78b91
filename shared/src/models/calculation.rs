//! Saved Calculation Model

use serde::{Deserialize, Serialize};

use super::pricing::{PricingInput, PricingResult};

/// A calculator run the user chose to keep
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Calculation {
    pub id: i64,
    pub company_id: i64,
    pub name: String,
    pub input: PricingInput,
    pub result: PricingResult,
    pub created_at: i64,
}

/// Save calculation payload
///
/// The result is always recomputed server-side from `input`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationCreate {
    pub name: String,
    #[serde(default)]
    pub input: PricingInput,
    /// Replace expense and tax rates in `input` with the company's configuration
    #[serde(default = "default_true")]
    pub use_company_rates: bool,
}

fn default_true() -> bool {
    true
}
