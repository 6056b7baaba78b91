//! Tax Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::serde_helpers::lenient_decimal;

/// Sales tax kinds a company can configure
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaxType {
    Icms,
    Pis,
    Cofins,
    Cpp,
    Issqn,
    Csll,
    Irpj,
    Others,
}

/// Configured tax rate of a company
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tax {
    pub id: i64,
    pub company_id: i64,
    pub tax_type: TaxType,
    /// Rate in percentage (e.g., 18 = 18%)
    pub rate: Decimal,
    pub created_at: i64,
}

/// Create tax payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxCreate {
    pub tax_type: TaxType,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub rate: Decimal,
}
