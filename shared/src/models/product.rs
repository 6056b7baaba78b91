//! Product Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::pricing::{AcquisitionTaxRates, PriceDriver, PricingInput};
use super::serde_helpers::{lenient_decimal, option_lenient_decimal};

/// Product entity with its persisted pricing figures
///
/// Monetary values are rounded to 2 decimal places when stored; markup and
/// margin are stored as percentages, `None` when they were not computable
/// (zero cost or zero price).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub company_id: i64,
    pub name: String,
    pub sku: Option<String>,
    pub cost_price: Decimal,
    pub icms_purchase: Decimal,
    pub ipi_purchase: Decimal,
    pub freight: Decimal,
    pub other_costs: Decimal,
    pub total_cost: Decimal,
    pub markup_percent: Option<Decimal>,
    pub profit_margin: Option<Decimal>,
    pub sales_price: Decimal,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Product {
    /// Cost side of the product as a calculator input
    pub fn pricing_input(&self) -> PricingInput {
        PricingInput {
            cost_price: self.cost_price,
            acquisition_tax_rates: AcquisitionTaxRates {
                icms_purchase: self.icms_purchase,
                ipi_purchase: self.ipi_purchase,
            },
            freight: self.freight,
            other_costs: self.other_costs,
            ..Default::default()
        }
    }
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub sku: Option<String>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub cost_price: Decimal,
    #[serde(flatten)]
    pub acquisition_tax_rates: AcquisitionTaxRates,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub freight: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub other_costs: Decimal,
    /// Which of markup / margin / price the user set
    pub driver: PriceDriver,
}

impl ProductCreate {
    pub fn pricing_input(&self) -> PricingInput {
        PricingInput {
            cost_price: self.cost_price,
            acquisition_tax_rates: self.acquisition_tax_rates,
            freight: self.freight,
            other_costs: self.other_costs,
            ..Default::default()
        }
    }
}

/// Update product payload
///
/// Cost changes without a `driver` keep the stored markup, or the stored
/// price when the product has no markup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub sku: Option<String>,
    #[serde(default, deserialize_with = "option_lenient_decimal")]
    pub cost_price: Option<Decimal>,
    #[serde(default, deserialize_with = "option_lenient_decimal")]
    pub icms_purchase: Option<Decimal>,
    #[serde(default, deserialize_with = "option_lenient_decimal")]
    pub ipi_purchase: Option<Decimal>,
    #[serde(default, deserialize_with = "option_lenient_decimal")]
    pub freight: Option<Decimal>,
    #[serde(default, deserialize_with = "option_lenient_decimal")]
    pub other_costs: Option<Decimal>,
    pub driver: Option<PriceDriver>,
    pub is_active: Option<bool>,
}
