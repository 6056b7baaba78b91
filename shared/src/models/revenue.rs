//! Revenue Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::serde_helpers::lenient_decimal;

/// Period a revenue figure covers
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RevenuePeriod {
    Monthly,
    Annual,
}

/// Revenue record of a company
///
/// At most one `Monthly` record exists per company; the store rejects a
/// second one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Revenue {
    pub id: i64,
    pub company_id: i64,
    pub description: String,
    pub value: Decimal,
    pub period: RevenuePeriod,
    pub created_at: i64,
}

/// Create revenue payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevenueCreate {
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub value: Decimal,
    pub period: RevenuePeriod,
}
